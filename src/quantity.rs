#[macro_use]
pub mod macros;

pub mod energy;
pub mod flow;
pub mod power;
pub mod proportions;
pub mod temperature;
pub mod time;
