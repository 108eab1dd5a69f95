use clap::Parser;

use crate::{
    api::modbus::Client,
    cli::{ConnectionArgs, PowerMapArgs},
    device::{catalog, register::Device},
    prelude::*,
    tables::build_readings_table,
};

#[derive(Parser)]
pub struct PeekArgs {
    #[clap(flatten)]
    connection: ConnectionArgs,

    #[clap(flatten)]
    power_map: PowerMapArgs,

    /// Only read the given device block.
    #[clap(long, value_enum)]
    device: Option<Device>,
}

impl PeekArgs {
    pub async fn run(&self) -> Result {
        let power_map = self.power_map.load()?;
        let mut client = Client::connect(&self.connection).await?;

        let mut readings = Vec::new();
        for register in catalog::REGISTERS {
            if self.device.is_none_or(|device| device == register.device) {
                readings.push((register, client.read_value(register).await?));
            }
        }
        println!("{}", build_readings_table(&readings));

        if self.device.is_none_or(|device| device == Device::HeatPump) {
            let heating_power = client.read_operating_point().await?.heating_power(&power_map);
            println!("heating power: {heating_power}");
        }
        Ok(())
    }
}
