use itertools::Itertools;
use tokio_modbus::Address;

use crate::{
    api::modbus::Operation,
    device::reading::Reading,
    prelude::*,
    quantity::{
        energy::KilowattHours,
        flow::CubicMetersPerHour,
        proportions::Percent,
        temperature::Celsius,
        time::{Hours, Minutes},
    },
};

/// One entry of the pump's register catalog.
///
/// The catalog is the single source of truth for what a raw word at an
/// address means: its device block, physical unit, decimal scale, and for
/// writable registers the allowed range.
#[derive(Copy, Clone)]
pub struct Register {
    pub name: &'static str,
    pub address: Address,
    pub device: Device,
    pub kind: Kind,
}

impl Register {
    /// Modbus operation, derived from the address range.
    pub fn operation(&self) -> Result<Operation> {
        Operation::try_from(self.address)
            .with_context(|| format!("register `{}` has an unsupported address", self.name))
    }

    /// Scaled numeric value of a raw word.
    pub fn scaled(&self, word: u16) -> Result<f64> {
        match self.kind {
            Kind::Sensor { scale, signed: true, .. } => Ok(f64::from(word.cast_signed()) / scale),
            Kind::Sensor { scale, signed: false, .. } | Kind::Setpoint { scale, .. } => {
                Ok(f64::from(word) / scale)
            }
            Kind::Status(_) => bail!("register `{}` is an enumerated state", self.name),
        }
    }

    /// Translate a raw word into a physical reading.
    pub fn decode(&self, word: u16) -> Result<Reading> {
        match self.kind {
            Kind::Sensor { unit, .. } | Kind::Setpoint { unit, .. } => {
                Ok(unit.reading(self.scaled(word)?))
            }
            Kind::Status(states) => states
                .iter()
                .find(|state| state.raw == word)
                .map(|state| Reading::State(state.name))
                .with_context(|| {
                    format!("register `{}` reported an unknown state #{word}", self.name)
                }),
        }
    }

    /// Translate user input back into a raw word, validating it on the way.
    pub fn encode(&self, input: &str) -> Result<u16> {
        match self.kind {
            Kind::Setpoint { scale, min, max, .. } => {
                let value: f64 = input
                    .parse()
                    .with_context(|| format!("`{input}` is not a valid number"))?;
                ensure!(
                    (min..=max).contains(&value),
                    "`{value}` is outside the allowed range {min}..{max} of `{}`",
                    self.name,
                );
                #[expect(clippy::cast_possible_truncation)]
                let raw = (value * scale).round() as i64;
                u16::try_from(raw)
                    .with_context(|| format!("`{value}` does not fit register `{}`", self.name))
            }
            Kind::Status(states) => states
                .iter()
                .find(|state| state.name == input)
                .map(|state| state.raw)
                .with_context(|| {
                    format!(
                        "`{input}` is not a valid option for `{}`, expected one of: {}",
                        self.name,
                        states.iter().map(|state| state.name).join(", "),
                    )
                }),
            Kind::Sensor { .. } => bail!("register `{}` is read-only", self.name),
        }
    }
}

/// Device block the register belongs to, mirroring the pump's own menu
/// structure.
#[derive(Copy, Clone, Debug, Eq, PartialEq, clap::ValueEnum, derive_more::Display)]
pub enum Device {
    #[display("system")]
    System,

    #[display("heating circuit")]
    HeatingCircuit,

    #[display("2nd heating circuit")]
    SecondHeatingCircuit,

    #[display("hot water")]
    HotWater,

    #[display("heat pump")]
    HeatPump,

    #[display("statistics")]
    Statistics,
}

#[derive(Copy, Clone)]
pub enum Kind {
    /// Read-only measurement. Temperatures come in signed tenths of a degree.
    Sensor { unit: Unit, scale: f64, signed: bool },

    /// Read-write number with the device's allowed range.
    Setpoint { unit: Unit, scale: f64, min: f64, max: f64, step: f64 },

    /// Enumerated state, also writable when it lives in a holding register.
    Status(&'static [State]),
}

#[derive(Copy, Clone)]
pub struct State {
    pub raw: u16,
    pub name: &'static str,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Unit {
    Celsius,
    KilowattHours,
    Percent,
    CubicMetersPerHour,
    Hours,
    Minutes,
    Bare,
}

impl Unit {
    pub fn reading(self, value: f64) -> Reading {
        match self {
            Self::Celsius => Reading::Temperature(Celsius(value)),
            Self::KilowattHours => Reading::Energy(KilowattHours(value)),
            Self::Percent => Reading::Percentage(Percent(value)),
            Self::CubicMetersPerHour => Reading::FlowRate(CubicMetersPerHour(value)),
            Self::Hours => Reading::Hours(Hours(value)),
            Self::Minutes => Reading::Minutes(Minutes(value)),
            Self::Bare => Reading::Bare(value),
        }
    }
}
