use clap::Parser;

use crate::{api::modbus::Client, cli::ConnectionArgs, device::catalog, prelude::*};

#[derive(Parser)]
pub struct SetArgs {
    #[clap(flatten)]
    connection: ConnectionArgs,

    /// Register name, as listed by `peek`.
    register: String,

    /// New value: a number for setpoints, an option name for modes.
    value: String,
}

impl SetArgs {
    pub async fn run(&self) -> Result {
        let register = catalog::find(&self.register)
            .with_context(|| format!("unknown register `{}`", self.register))?;
        let word = register.encode(&self.value)?;

        let mut client = Client::connect(&self.connection).await?;
        client.write(register, word).await?;

        // Read back what the device actually accepted.
        let reading = client.read_value(register).await?;
        info!(register = register.name, value = %reading, "written");
        Ok(())
    }
}
