pub mod modbus;
pub mod webif;
