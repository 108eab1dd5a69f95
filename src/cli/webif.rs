use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use tokio::time::{MissedTickBehavior, interval};

use crate::{cli::WebifConnectionArgs, prelude::*, tables::build_portal_table};

#[derive(Parser)]
pub struct WebifArgs {
    #[clap(flatten)]
    connection: WebifConnectionArgs,

    /// Keep polling instead of exiting after the first fetch.
    #[clap(long)]
    follow: bool,

    #[clap(long, env = "WEBIF_POLLING_INTERVAL", default_value = "1min")]
    polling_interval: humantime::Duration,
}

impl WebifArgs {
    pub async fn run(&self) -> Result {
        let client = self.connection.connect().await?;

        let should_terminate = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(signal_hook::consts::SIGTERM, Arc::clone(&should_terminate))?;
        signal_hook::flag::register(signal_hook::consts::SIGINT, Arc::clone(&should_terminate))?;

        let mut interval = interval(self.polling_interval.into());
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            let values = client.get_values().await?;
            println!("{}", build_portal_table(&values));
            if !self.follow || should_terminate.load(Ordering::Relaxed) {
                break;
            }
        }
        Ok(())
    }
}
