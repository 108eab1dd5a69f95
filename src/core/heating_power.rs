use crate::{
    core::power_map::PowerMap,
    quantity::{power::Watts, proportions::Percent, temperature::Celsius},
};

/// Heating power delivered at the operating point.
///
/// The pump only reports the compressor power demand in percent; the
/// absolute figure is the demand applied to the map's output at the current
/// outdoor and flow temperatures, rounded to whole watts.
#[must_use]
pub fn heating_power(
    demand: Percent,
    outdoor_temperature: Celsius,
    flow_temperature: Celsius,
    power_map: &PowerMap,
) -> Watts {
    let available = power_map.value_at(outdoor_temperature.0, flow_temperature.0);
    Watts((demand.to_proportion() * available).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn power_map() -> PowerMap {
        PowerMap::new(
            vec![-10.0, 0.0, 10.0],
            vec![35.0, 55.0],
            vec![vec![3900.0, 3420.0], vec![5600.0, 4910.0], vec![7300.0, 6400.0]],
        )
        .unwrap()
    }

    #[test]
    fn full_demand_yields_the_map_value() {
        let power =
            heating_power(Percent(100.0), Celsius(0.0), Celsius(35.0), &power_map());
        assert_eq!(power, Watts(5600.0));
    }

    #[test]
    fn demand_scales_the_map_value() {
        let power =
            heating_power(Percent(50.0), Celsius(0.0), Celsius(35.0), &power_map());
        assert_eq!(power, Watts(2800.0));
    }

    #[test]
    fn zero_demand_yields_zero() {
        let power =
            heating_power(Percent(0.0), Celsius(-25.0), Celsius(80.0), &power_map());
        assert_eq!(power, Watts(0.0));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        let map = PowerMap::new(vec![0.0], vec![0.0], vec![vec![5.0]]).unwrap();
        let power = heating_power(Percent(50.0), Celsius(0.0), Celsius(0.0), &map);
        assert_eq!(power, Watts(3.0));
    }

    #[test]
    fn out_of_range_telemetry_is_clamped() {
        let map = power_map();
        let frozen = heating_power(Percent(100.0), Celsius(-40.0), Celsius(35.0), &map);
        assert_eq!(frozen, heating_power(Percent(100.0), Celsius(-10.0), Celsius(35.0), &map));
    }
}
