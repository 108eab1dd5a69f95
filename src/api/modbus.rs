mod client;

pub use self::client::Client;
use crate::{
    core::{heating_power::heating_power, power_map::PowerMap},
    device::catalog::{HEAT_PUMP_FLOW_TEMPERATURE, OUTDOOR_TEMPERATURE, POWER_DEMAND},
    prelude::*,
    quantity::{power::Watts, proportions::Percent, temperature::Celsius},
};

/// Modbus operation, encoded in the register address per the pump's
/// documentation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Operation {
    Input,
    Holding,
}

impl TryFrom<tokio_modbus::Address> for Operation {
    type Error = Error;

    fn try_from(address: tokio_modbus::Address) -> Result<Self, Self::Error> {
        match address {
            30000..=39999 => Ok(Self::Input),
            40000..=49999 => Ok(Self::Holding),
            _ => bail!("register #{address} is outside the supported address ranges"),
        }
    }
}

/// The three coordinates the heating-power calculation needs.
#[must_use]
pub struct OperatingPoint {
    pub demand: Percent,
    pub outdoor_temperature: Celsius,
    pub flow_temperature: Celsius,
}

impl OperatingPoint {
    pub fn heating_power(&self, power_map: &PowerMap) -> Watts {
        heating_power(self.demand, self.outdoor_temperature, self.flow_temperature, power_map)
    }
}

impl Client {
    #[instrument(skip_all)]
    pub async fn read_operating_point(&mut self) -> Result<OperatingPoint> {
        let demand = Percent(POWER_DEMAND.scaled(self.read(&POWER_DEMAND).await?)?);
        let outdoor_temperature =
            Celsius(OUTDOOR_TEMPERATURE.scaled(self.read(&OUTDOOR_TEMPERATURE).await?)?);
        let flow_temperature = Celsius(
            HEAT_PUMP_FLOW_TEMPERATURE.scaled(self.read(&HEAT_PUMP_FLOW_TEMPERATURE).await?)?,
        );
        info!(?demand, ?outdoor_temperature, ?flow_temperature, "fetched the operating point");
        Ok(OperatingPoint { demand, outdoor_temperature, flow_temperature })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_addresses_map_to_input() -> Result {
        assert_eq!(Operation::try_from(30001)?, Operation::Input);
        Ok(())
    }

    #[test]
    fn holding_addresses_map_to_holding() -> Result {
        assert_eq!(Operation::try_from(42001)?, Operation::Holding);
        Ok(())
    }

    #[test]
    fn other_addresses_are_rejected() {
        assert!(Operation::try_from(1).is_err());
        assert!(Operation::try_from(50000).is_err());
    }
}
