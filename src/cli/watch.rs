use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use bon::Builder;
use clap::Parser;
use reqwest::Url;
use tokio::time::{MissedTickBehavior, interval};

use crate::{
    api::modbus::Client,
    cli::{ConnectionArgs, PowerMapArgs},
    core::power_map::PowerMap,
    device::catalog,
    prelude::*,
};

#[derive(Parser)]
pub struct WatchArgs {
    /// How often to poll the registers.
    #[clap(long, env = "POLLING_INTERVAL", default_value = "30s")]
    polling_interval: humantime::Duration,

    #[clap(flatten)]
    connection: ConnectionArgs,

    #[clap(flatten)]
    power_map: PowerMapArgs,

    #[clap(flatten)]
    heartbeat: HeartbeatArgs,
}

impl WatchArgs {
    pub async fn run(&self) -> Result {
        Watcher::builder()
            .power_map(self.power_map.load()?)
            .client(Client::connect(&self.connection).await?)
            .heartbeat(&self.heartbeat)
            .polling_interval(self.polling_interval)
            .build()
            .run()
            .await
    }
}

#[derive(Builder)]
struct Watcher<'a> {
    client: Client,
    power_map: PowerMap,
    heartbeat: &'a HeartbeatArgs,

    #[builder(into)]
    polling_interval: Duration,
}

impl Watcher<'_> {
    async fn run(mut self) -> Result {
        let should_terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&should_terminate))?;
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&should_terminate))?;

        let mut interval = interval(self.polling_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !should_terminate.load(Ordering::Relaxed) {
            interval.tick().await;
            self.sweep().await?;
            self.heartbeat.send().await;
        }
        Ok(())
    }

    #[instrument(skip_all)]
    async fn sweep(&mut self) -> Result {
        for register in catalog::REGISTERS {
            let reading = self.client.read_value(register).await?;
            info!(device = %register.device, register = register.name, value = %reading);
        }
        let heating_power =
            self.client.read_operating_point().await?.heating_power(&self.power_map);
        info!(register = "heating_power", value = %heating_power);
        Ok(())
    }
}

/// Dead-man-switch ping after each successful sweep.
#[derive(Parser)]
pub struct HeartbeatArgs {
    #[clap(long = "heartbeat-url", env = "HEARTBEAT_URL")]
    url: Option<Url>,
}

impl HeartbeatArgs {
    pub async fn send(&self) {
        if let Some(url) = &self.url
            && let Err(error) = Self::send_fallible(url.clone()).await
        {
            warn!("failed to send the heartbeat: {error:#}");
        }
    }

    #[instrument(skip_all)]
    async fn send_fallible(url: Url) -> Result {
        info!("sending a heartbeat…");
        reqwest::Client::builder()
            .timeout(Duration::from_secs(3))
            .build()?
            .post(url)
            .send()
            .await?;
        Ok(())
    }
}
