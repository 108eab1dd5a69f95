use clap::Parser;

use crate::{
    cli::PowerMapArgs,
    core::heating_power::heating_power,
    prelude::*,
    quantity::{proportions::Percent, temperature::Celsius},
};

#[derive(Parser)]
pub struct PowerArgs {
    #[clap(flatten)]
    power_map: PowerMapArgs,

    /// Outdoor temperature in °C.
    #[clap(long = "outdoor-temperature", allow_hyphen_values = true)]
    outdoor_temperature: Celsius,

    /// Heat-pump flow temperature in °C.
    #[clap(long = "flow-temperature", allow_hyphen_values = true)]
    flow_temperature: Celsius,

    /// Compressor power demand in percent.
    #[clap(long = "demand", default_value = "100")]
    demand: Percent,
}

impl PowerArgs {
    pub fn run(&self) -> Result {
        let power_map = self.power_map.load()?;
        let power = heating_power(
            self.demand,
            self.outdoor_temperature,
            self.flow_temperature,
            &power_map,
        );
        println!("{power}");
        Ok(())
    }
}
