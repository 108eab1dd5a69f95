mod peek;
mod power;
mod set;
mod watch;
mod webif;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use reqwest::Url;

pub use self::{
    peek::PeekArgs,
    power::PowerArgs,
    set::SetArgs,
    watch::WatchArgs,
    webif::WebifArgs,
};
use crate::{core::power_map::PowerMap, prelude::*};

#[derive(Parser)]
#[command(author, version, about, propagate_version = true)]
#[must_use]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Main command: poll the heat pump and log the readings.
    Watch(Box<WatchArgs>),

    /// Read the register catalog once and render it as a table.
    Peek(Box<PeekArgs>),

    /// Write a setpoint or select an operating mode.
    Set(Box<SetArgs>),

    /// Log into the web portal and dump the exported values.
    Webif(Box<WebifArgs>),

    /// Evaluate the power map at an operating point.
    Power(Box<PowerArgs>),
}

#[derive(Parser)]
pub struct ConnectionArgs {
    /// Heat-pump Modbus host name or IP address.
    #[clap(long = "host", env = "HEAT_PUMP_HOST")]
    pub host: String,

    #[clap(long = "port", env = "HEAT_PUMP_PORT", default_value = "502")]
    pub port: u16,

    #[clap(long = "slave-id", env = "HEAT_PUMP_SLAVE_ID", default_value = "1")]
    pub slave_id: tokio_modbus::SlaveId,
}

#[derive(Parser)]
pub struct PowerMapArgs {
    /// Device-specific power-map file; the bundled WBB map is used when omitted.
    #[clap(long = "power-map-file", env = "POWER_MAP_FILE")]
    pub file: Option<PathBuf>,
}

impl PowerMapArgs {
    const BUNDLED_WBB: &'static str = include_str!("../data/wbb_power_map.json");

    pub fn load(&self) -> Result<PowerMap> {
        match &self.file {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read `{}`", path.display()))?;
                PowerMap::from_json(&json).with_context(|| {
                    format!("`{}` does not contain a valid power map", path.display())
                })
            }
            None => {
                PowerMap::from_json(Self::BUNDLED_WBB).context("the bundled power map is invalid")
            }
        }
    }
}

#[derive(Parser)]
pub struct WebifConnectionArgs {
    /// Base URL of the pump's local web portal, for example `http://10.0.0.15`.
    #[clap(long = "webif-url", env = "WEBIF_URL")]
    pub url: Url,

    #[clap(long = "webif-username", env = "WEBIF_USERNAME")]
    pub username: String,

    #[clap(long = "webif-password", env = "WEBIF_PASSWORD")]
    pub password: String,
}

impl WebifConnectionArgs {
    pub async fn connect(&self) -> Result<crate::api::webif::Client> {
        let client = crate::api::webif::Client::new(self.url.clone())?;
        client.log_in(&self.username, &self.password).await?;
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_power_map_is_valid() {
        PowerMapArgs { file: None }.load().unwrap();
    }
}
