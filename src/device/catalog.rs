//! Register catalog of the WBB series.
//!
//! Addresses follow the pump's Modbus documentation: input registers in the
//! `30000`s per device block, holding registers in the `40000`s. All values
//! are single words; temperatures are signed tenths of a degree.

use crate::device::register::{Device, Kind, Register, State, Unit};

const fn temperature(name: &'static str, address: u16, device: Device) -> Register {
    Register {
        name,
        address,
        device,
        kind: Kind::Sensor { unit: Unit::Celsius, scale: 10.0, signed: true },
    }
}

const fn temperature_setpoint(
    name: &'static str,
    address: u16,
    device: Device,
    min: f64,
    max: f64,
) -> Register {
    Register {
        name,
        address,
        device,
        kind: Kind::Setpoint { unit: Unit::Celsius, scale: 10.0, min, max, step: 0.5 },
    }
}

const OPERATING_PHASES: &[State] = &[
    State { raw: 0, name: "standby" },
    State { raw: 1, name: "heating" },
    State { raw: 2, name: "hot water" },
    State { raw: 3, name: "defrost" },
    State { raw: 4, name: "cooling" },
];

const SYSTEM_MODES: &[State] = &[
    State { raw: 0, name: "summer" },
    State { raw: 1, name: "automatic" },
    State { raw: 2, name: "heating" },
    State { raw: 3, name: "cooling" },
    State { raw: 4, name: "standby" },
];

const CIRCULATION_MODES: &[State] = &[
    State { raw: 0, name: "off" },
    State { raw: 1, name: "pulse" },
    State { raw: 2, name: "permanent" },
];

pub const OUTDOOR_TEMPERATURE: Register =
    temperature("outdoor_temperature", 30001, Device::System);

pub const POWER_DEMAND: Register = Register {
    name: "heat_pump_power_demand",
    address: 33001,
    device: Device::HeatPump,
    kind: Kind::Sensor { unit: Unit::Percent, scale: 1.0, signed: false },
};

pub const HEAT_PUMP_FLOW_TEMPERATURE: Register =
    temperature("heat_pump_flow_temperature", 33002, Device::HeatPump);

pub static REGISTERS: &[Register] = &[
    // System:
    OUTDOOR_TEMPERATURE,
    temperature("averaged_outdoor_temperature", 30002, Device::System),
    temperature("long_term_outdoor_temperature", 30003, Device::System),
    Register {
        name: "fault_code",
        address: 30005,
        device: Device::System,
        kind: Kind::Sensor { unit: Unit::Bare, scale: 1.0, signed: false },
    },
    Register {
        name: "operating_phase",
        address: 30006,
        device: Device::System,
        kind: Kind::Status(OPERATING_PHASES),
    },
    Register {
        name: "system_mode",
        address: 40001,
        device: Device::System,
        kind: Kind::Status(SYSTEM_MODES),
    },
    // Heating circuit:
    temperature("heating_room_temperature", 31001, Device::HeatingCircuit),
    temperature("heating_room_setpoint", 31002, Device::HeatingCircuit),
    temperature("heating_flow_temperature", 31003, Device::HeatingCircuit),
    temperature("heating_flow_setpoint", 31004, Device::HeatingCircuit),
    temperature_setpoint("heating_comfort_temperature", 41001, Device::HeatingCircuit, 15.0, 30.0),
    temperature_setpoint("heating_reduced_temperature", 41002, Device::HeatingCircuit, 10.0, 25.0),
    Register {
        name: "heating_curve",
        address: 41003,
        device: Device::HeatingCircuit,
        kind: Kind::Setpoint { unit: Unit::Bare, scale: 100.0, min: 0.2, max: 3.5, step: 0.05 },
    },
    Register {
        name: "heating_party_hours",
        address: 41004,
        device: Device::HeatingCircuit,
        kind: Kind::Setpoint { unit: Unit::Hours, scale: 2.0, min: 0.0, max: 12.0, step: 0.5 },
    },
    // 2nd heating circuit:
    temperature("second_room_temperature", 34001, Device::SecondHeatingCircuit),
    temperature("second_flow_temperature", 34002, Device::SecondHeatingCircuit),
    temperature_setpoint(
        "second_comfort_temperature",
        44001,
        Device::SecondHeatingCircuit,
        15.0,
        30.0,
    ),
    // Hot water:
    temperature("hot_water_temperature", 32001, Device::HotWater),
    temperature_setpoint("hot_water_normal_setpoint", 42001, Device::HotWater, 40.0, 60.0),
    temperature_setpoint("hot_water_reduced_setpoint", 42002, Device::HotWater, 30.0, 40.0),
    Register {
        name: "hot_water_circulation_mode",
        address: 42003,
        device: Device::HotWater,
        kind: Kind::Status(CIRCULATION_MODES),
    },
    // Heat pump:
    POWER_DEMAND,
    HEAT_PUMP_FLOW_TEMPERATURE,
    temperature("heat_pump_return_temperature", 33003, Device::HeatPump),
    Register {
        name: "heat_pump_volume_flow",
        address: 33004,
        device: Device::HeatPump,
        kind: Kind::Sensor { unit: Unit::CubicMetersPerHour, scale: 100.0, signed: false },
    },
    // Statistics:
    Register {
        name: "heating_energy",
        address: 36001,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::KilowattHours, scale: 1.0, signed: false },
    },
    Register {
        name: "hot_water_energy",
        address: 36002,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::KilowattHours, scale: 1.0, signed: false },
    },
    Register {
        name: "total_energy",
        address: 36003,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::KilowattHours, scale: 1.0, signed: false },
    },
    Register {
        name: "compressor_starts",
        address: 36004,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::Bare, scale: 1.0, signed: false },
    },
    Register {
        name: "compressor_runtime",
        address: 36005,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::Hours, scale: 1.0, signed: false },
    },
    Register {
        name: "defrost_runtime",
        address: 36006,
        device: Device::Statistics,
        kind: Kind::Sensor { unit: Unit::Minutes, scale: 1.0, signed: false },
    },
];

pub fn find(name: &str) -> Option<&'static Register> {
    REGISTERS.iter().find(|register| register.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::api::modbus::Operation;

    #[test]
    fn names_are_unique() {
        let mut names = HashSet::new();
        for register in REGISTERS {
            assert!(names.insert(register.name), "`{}` is listed twice", register.name);
        }
    }

    #[test]
    fn addresses_map_to_an_operation() {
        for register in REGISTERS {
            register.operation().unwrap();
        }
    }

    #[test]
    fn setpoints_live_in_holding_registers() {
        for register in REGISTERS {
            if matches!(register.kind, Kind::Setpoint { .. }) {
                assert_eq!(register.operation().unwrap(), Operation::Holding, "{}", register.name);
            }
        }
    }

    #[test]
    fn setpoint_ranges_are_sane() {
        for register in REGISTERS {
            if let Kind::Setpoint { min, max, step, .. } = register.kind {
                assert!(min < max, "{}", register.name);
                assert!(step > 0.0, "{}", register.name);
            }
        }
    }

    #[test]
    fn finds_a_register_by_name() {
        assert!(find("hot_water_normal_setpoint").is_some());
        assert!(find("warp_drive_temperature").is_none());
    }
}
