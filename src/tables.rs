use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use itertools::Itertools;

use crate::{
    api::webif::PortalValue,
    device::{
        reading::Reading,
        register::{Kind, Register},
    },
};

pub fn build_readings_table(readings: &[(&Register, Reading)]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Device", "Register", "Address", "Value", "Allowed"]);
    for (register, reading) in readings {
        table.add_row(vec![
            Cell::new(register.device).add_attribute(Attribute::Dim),
            Cell::new(register.name),
            Cell::new(register.address).add_attribute(Attribute::Dim),
            value_cell(*reading),
            allowed_cell(register).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

pub fn build_portal_table(values: &[PortalValue]) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Name", "Value", "Unit"]);
    for value in values {
        table.add_row(vec![
            Cell::new(&value.name),
            Cell::new(&value.value).set_alignment(CellAlignment::Right),
            Cell::new(value.unit.as_deref().unwrap_or_default()).add_attribute(Attribute::Dim),
        ]);
    }
    table
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

fn value_cell(reading: Reading) -> Cell {
    let cell = Cell::new(reading).set_alignment(CellAlignment::Right);
    if reading.is_state() { cell.fg(Color::Yellow) } else { cell }
}

fn allowed_cell(register: &Register) -> Cell {
    match register.kind {
        Kind::Sensor { .. } => Cell::new(""),
        Kind::Setpoint { min, max, step, .. } => Cell::new(format!("{min}..{max} step {step}")),
        Kind::Status(states) => Cell::new(states.iter().map(|state| state.name).join(" | ")),
    }
}
