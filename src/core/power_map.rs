use serde::Deserialize;

/// Heat output the compressor can deliver at full demand, tabulated over
/// outdoor and flow temperatures.
///
/// The pump's data sheet specifies the output on a rectangular grid of
/// breakpoints. Queries in between are interpolated bilinearly, and queries
/// outside the grid are clamped to the nearest boundary: out-of-range
/// telemetry (a sensor glitch, a defrost spike) should degrade to the edge
/// of the map rather than extrapolate into nonsense.
///
/// Built once at startup and never mutated afterwards.
#[derive(Clone, Deserialize)]
#[serde(try_from = "UncheckedPowerMap")]
pub struct PowerMap {
    outdoor_temperatures: Vec<f64>,
    flow_temperatures: Vec<f64>,
    power_watts: Vec<Vec<f64>>,
}

impl PowerMap {
    /// Validate the breakpoints and the grid, and build the map.
    ///
    /// `power_watts` holds one row per outdoor temperature, one value per
    /// flow temperature within a row.
    pub fn new(
        outdoor_temperatures: Vec<f64>,
        flow_temperatures: Vec<f64>,
        power_watts: Vec<Vec<f64>>,
    ) -> Result<Self, PowerMapError> {
        validate_axis(&outdoor_temperatures)?;
        validate_axis(&flow_temperatures)?;
        if power_watts.len() != outdoor_temperatures.len() {
            return Err(PowerMapError::RowCountMismatch {
                expected: outdoor_temperatures.len(),
                actual: power_watts.len(),
            });
        }
        for (row, values) in power_watts.iter().enumerate() {
            if values.len() != flow_temperatures.len() {
                return Err(PowerMapError::RowLengthMismatch {
                    row,
                    expected: flow_temperatures.len(),
                    actual: values.len(),
                });
            }
        }
        Ok(Self { outdoor_temperatures, flow_temperatures, power_watts })
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Interpolated heat output at the operating point, in watts.
    ///
    /// Exact breakpoints reproduce the grid values exactly. Coordinates
    /// outside the tabulated ranges are clamped to the nearest boundary.
    #[must_use]
    pub fn value_at(&self, outdoor_temperature: f64, flow_temperature: f64) -> f64 {
        let (row, row_fraction) = bracket(&self.outdoor_temperatures, outdoor_temperature);
        let (column, column_fraction) = bracket(&self.flow_temperatures, flow_temperature);
        let at_lower_flow = lerp(
            self.power_watts[row.0][column.0],
            self.power_watts[row.1][column.0],
            row_fraction,
        );
        let at_upper_flow = lerp(
            self.power_watts[row.0][column.1],
            self.power_watts[row.1][column.1],
            row_fraction,
        );
        lerp(at_lower_flow, at_upper_flow, column_fraction)
    }
}

/// Raw deserialization target, funneled through [`PowerMap::new`] so that a
/// map read from a file passes the same validation as one built in code.
#[derive(Deserialize)]
struct UncheckedPowerMap {
    outdoor_temperatures: Vec<f64>,
    flow_temperatures: Vec<f64>,
    power_watts: Vec<Vec<f64>>,
}

impl TryFrom<UncheckedPowerMap> for PowerMap {
    type Error = PowerMapError;

    fn try_from(map: UncheckedPowerMap) -> Result<Self, Self::Error> {
        Self::new(map.outdoor_temperatures, map.flow_temperatures, map.power_watts)
    }
}

fn validate_axis(axis: &[f64]) -> Result<(), PowerMapError> {
    if axis.is_empty() {
        return Err(PowerMapError::EmptyAxis);
    }
    for window in axis.windows(2) {
        if window[1] <= window[0] {
            return Err(PowerMapError::UnorderedAxis { previous: window[0], next: window[1] });
        }
    }
    Ok(())
}

/// Find the pair of breakpoint indexes bracketing the coordinate, and the
/// coordinate's fractional position between them.
///
/// Clamping happens here: coordinates at or beyond an end of the axis
/// collapse onto the boundary breakpoint with a zero fraction, and so does a
/// single-breakpoint axis, keeping the interpolation free of zero-width
/// divisions.
fn bracket(axis: &[f64], at: f64) -> ((usize, usize), f64) {
    let last = axis.len() - 1;
    if at <= axis[0] || last == 0 {
        return ((0, 0), 0.0);
    }
    if at >= axis[last] {
        return ((last, last), 0.0);
    }
    let upper = axis.partition_point(|breakpoint| *breakpoint <= at);
    let lower = upper - 1;
    let width = axis[upper] - axis[lower];
    ((lower, upper), (at - axis[lower]) / width)
}

fn lerp(from: f64, to: f64, fraction: f64) -> f64 {
    if fraction == 0.0 {
        from
    } else {
        from * (1.0 - fraction) + to * fraction
    }
}

/// The map must not be built from a malformed table, so the constructor
/// rejects it upfront instead of letting a lookup go wrong later.
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum PowerMapError {
    #[display("a temperature axis must contain at least one breakpoint")]
    EmptyAxis,

    #[display("axis breakpoints must be strictly increasing: {previous} is followed by {next}")]
    UnorderedAxis { previous: f64, next: f64 },

    #[display("expected one row per outdoor temperature ({expected}), got {actual}")]
    RowCountMismatch { expected: usize, actual: usize },

    #[display("row #{row}: expected one value per flow temperature ({expected}), got {actual}")]
    RowLengthMismatch { row: usize, expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn simple_map() -> PowerMap {
        PowerMap::new(
            vec![0.0, 10.0, 20.0],
            vec![0.0, 10.0],
            vec![vec![0.0, 0.0], vec![5.0, 10.0], vec![10.0, 20.0]],
        )
        .unwrap()
    }

    #[test]
    fn reproduces_grid_values_at_breakpoints() {
        let map = simple_map();
        for (row, outdoor) in [0.0, 10.0, 20.0].into_iter().enumerate() {
            for (column, flow) in [0.0, 10.0].into_iter().enumerate() {
                assert_eq!(map.value_at(outdoor, flow), map.power_watts[row][column]);
            }
        }
    }

    #[test]
    fn interpolates_bilinearly() {
        let map = simple_map();
        // Corners (0, 0, 5, 10) blended at the midpoint of the bracketing rectangle:
        assert_relative_eq!(map.value_at(5.0, 5.0), 3.75);
    }

    #[test]
    fn interpolates_linearly_on_a_breakpoint() {
        let map = simple_map();
        assert_relative_eq!(map.value_at(10.0, 5.0), 7.5);
        assert_relative_eq!(map.value_at(15.0, 0.0), 7.5);
    }

    #[test]
    fn clamps_beyond_the_boundaries() {
        let map = simple_map();
        assert_eq!(map.value_at(-5.0, 5.0), map.value_at(0.0, 5.0));
        assert_eq!(map.value_at(25.0, 5.0), map.value_at(20.0, 5.0));
        assert_eq!(map.value_at(5.0, -3.0), map.value_at(5.0, 0.0));
        assert_eq!(map.value_at(5.0, 42.0), map.value_at(5.0, 10.0));
    }

    #[test]
    fn preserves_monotonicity_along_an_axis() {
        let map = simple_map();
        let samples: Vec<f64> =
            (0..=40).map(|step| map.value_at(0.5 * f64::from(step), 5.0)).collect();
        for window in samples.windows(2) {
            assert!(window[1] >= window[0], "{} is followed by {}", window[0], window[1]);
        }
    }

    #[test]
    fn degrades_to_the_corner_on_a_single_breakpoint_axis() {
        let map = PowerMap::new(vec![5.0], vec![0.0, 10.0], vec![vec![7.0, 9.0]]).unwrap();
        assert_eq!(map.value_at(-100.0, 0.0), 7.0);
        assert_eq!(map.value_at(100.0, 10.0), 9.0);
        assert_relative_eq!(map.value_at(5.0, 5.0), 8.0);
    }

    #[test]
    fn rejects_an_empty_axis() {
        let result = PowerMap::new(vec![], vec![0.0], vec![]);
        assert!(matches!(result, Err(PowerMapError::EmptyAxis)));
    }

    #[test]
    fn rejects_an_unordered_axis() {
        let result = PowerMap::new(
            vec![1.0, 3.0, 2.0],
            vec![0.0],
            vec![vec![0.0], vec![0.0], vec![0.0]],
        );
        assert!(matches!(result, Err(PowerMapError::UnorderedAxis { .. })));
    }

    #[test]
    fn rejects_a_duplicated_breakpoint() {
        let result = PowerMap::new(vec![1.0, 1.0], vec![0.0], vec![vec![0.0], vec![0.0]]);
        assert!(matches!(result, Err(PowerMapError::UnorderedAxis { .. })));
    }

    #[test]
    fn rejects_a_row_count_mismatch() {
        let result = PowerMap::new(
            vec![0.0, 10.0, 20.0, 30.0, 40.0],
            vec![0.0],
            vec![vec![0.0], vec![0.0], vec![0.0], vec![0.0]],
        );
        assert!(matches!(
            result,
            Err(PowerMapError::RowCountMismatch { expected: 5, actual: 4 })
        ));
    }

    #[test]
    fn rejects_a_row_length_mismatch() {
        let result = PowerMap::new(
            vec![0.0, 10.0],
            vec![0.0, 10.0],
            vec![vec![0.0, 0.0], vec![0.0]],
        );
        assert!(matches!(
            result,
            Err(PowerMapError::RowLengthMismatch { row: 1, expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn deserializes_and_validates() -> crate::prelude::Result {
        // language=json
        let json = r#"{
            "outdoor_temperatures": [-10, 0, 10],
            "flow_temperatures": [35, 45],
            "power_watts": [[3900, 3660], [5600, 5250], [7300, 6840]]
        }"#;
        let map = PowerMap::from_json(json)?;
        assert_eq!(map.value_at(0.0, 45.0), 5250.0);
        Ok(())
    }

    #[test]
    fn rejects_a_malformed_document() {
        // language=json
        let json = r#"{
            "outdoor_temperatures": [10, -10],
            "flow_temperatures": [35],
            "power_watts": [[3900], [5600]]
        }"#;
        assert!(PowerMap::from_json(json).is_err());
    }
}
