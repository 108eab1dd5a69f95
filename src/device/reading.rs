use crate::quantity::{
    energy::KilowattHours,
    flow::CubicMetersPerHour,
    proportions::Percent,
    temperature::Celsius,
    time::{Hours, Minutes},
};

/// Physical reading translated from a raw register word.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, derive_more::Display, derive_more::From)]
pub enum Reading {
    Temperature(Celsius),
    Energy(KilowattHours),
    Percentage(Percent),
    FlowRate(CubicMetersPerHour),
    Hours(Hours),
    Minutes(Minutes),
    Bare(f64),
    State(&'static str),
}

impl Reading {
    /// `true` for enumerated states, `false` for numeric readings.
    pub const fn is_state(&self) -> bool {
        matches!(self, Self::State(_))
    }
}
