quantity!(Percent, "%");

impl Percent {
    /// Proportion in the `0.0..=1.0` range.
    pub const fn to_proportion(self) -> f64 {
        0.01 * self.0
    }
}
