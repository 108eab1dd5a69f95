use std::time::Duration;

use itertools::Itertools;
use tokio::{
    net::{TcpStream, lookup_host},
    time::timeout,
};
use tokio_modbus::{
    Slave,
    client::{Reader, Writer, tcp::attach_slave},
};

use crate::{
    api::modbus::Operation,
    cli::ConnectionArgs,
    device::{reading::Reading, register::Register},
    prelude::*,
};

pub struct Client {
    context: tokio_modbus::client::Context,
}

impl Client {
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    const READ_TIMEOUT: Duration = Duration::from_secs(10);
    const WRITE_TIMEOUT: Duration = Duration::from_secs(10);

    #[instrument(skip_all, fields(host = %args.host, port = args.port, slave_id = args.slave_id))]
    pub async fn connect(args: &ConnectionArgs) -> Result<Self> {
        info!("connecting…");
        let addresses = lookup_host((args.host.as_str(), args.port)).await?.collect_vec();
        let tcp_stream = timeout(Self::CONNECT_TIMEOUT, TcpStream::connect(&*addresses))
            .await
            .context("timed out while connecting to the heat pump")?
            .context("failed to connect to the heat pump")?;
        tcp_stream.set_nodelay(true)?;
        info!("connected");
        Ok(Self { context: attach_slave(tcp_stream, Slave(args.slave_id)) })
    }

    /// Read the raw word behind the register.
    #[instrument(skip_all, level = "debug", fields(register = register.name, address = register.address))]
    pub async fn read(&mut self, register: &Register) -> Result<u16> {
        let read = match register.operation()? {
            Operation::Input => self.context.read_input_registers(register.address, 1),
            Operation::Holding => self.context.read_holding_registers(register.address, 1),
        };
        let word = timeout(Self::READ_TIMEOUT, read)
            .await
            .context("timed out reading the register")???
            .pop()
            .with_context(|| format!("nothing is read from register #{}", register.address))?;
        debug!(word, "read");
        Ok(word)
    }

    /// Read and translate the register into a physical reading.
    pub async fn read_value(&mut self, register: &Register) -> Result<Reading> {
        register.decode(self.read(register).await?)
    }

    /// Write a raw word into a holding register.
    #[instrument(skip_all, fields(register = register.name, address = register.address, word))]
    pub async fn write(&mut self, register: &Register, word: u16) -> Result {
        ensure!(
            register.operation()? == Operation::Holding,
            "register `{}` is not writable",
            register.name,
        );
        timeout(Self::WRITE_TIMEOUT, self.context.write_single_register(register.address, word))
            .await
            .context("timed out writing the register")???;
        debug!("written");
        Ok(())
    }
}
