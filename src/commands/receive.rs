//! Receive command - listen for hidden messages and print each decoded record.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use zwsp::relay::transport::TcpListener;
use zwsp::relay::{Hub, Receiver, RelayConfig, RelayError};
use zwsp::Mode;

use super::{load_config, runtime, CommandExecutor};

/// Listen for published messages, decode them and print one JSON record per
/// message until interrupted (Ctrl-C).
#[derive(Args, Debug)]
pub struct ReceiveCommand {
    /// Relay config file (TOML). ZWSP_* environment variables override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the listen address from the config (host:port)
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the codec mode from the config
    #[arg(long)]
    pub mode: Option<Mode>,
}

impl CommandExecutor for ReceiveCommand {
    fn execute(&self) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        let address = self.bind.clone().unwrap_or_else(|| config.address());

        runtime()?.block_on(run(config, address))
    }
}

async fn run(config: RelayConfig, address: String) -> Result<()> {
    let listener = TcpListener::bind(address.as_str())
        .await
        .with_context(|| format!("Failed to listen on {}", address))?;
    info!(
        address = %listener.local_addr()?,
        topic = %config.topic,
        mode = %config.mode,
        "Receiver listening"
    );

    let hub = Hub::default();
    let mut observer = hub.subscribe();
    let receiver = Receiver::from_config(&config, hub);
    let mut server = tokio::spawn(receiver.serve(listener, config.topic.clone()));

    loop {
        tokio::select! {
            result = &mut server => return server_exit(result),
            record = observer.recv() => match record {
                Ok(record) => println!("{}", record.to_json()?),
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "Printer fell behind, records skipped");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    server.abort();
    Ok(())
}

/// Turns an early end of the accept loop into a command failure.
fn server_exit(result: Result<Result<(), RelayError>, tokio::task::JoinError>) -> Result<()> {
    result
        .context("Receiver task failed")?
        .context("Receiver stopped accepting connections")?;
    anyhow::bail!("Receiver stopped accepting connections")
}
