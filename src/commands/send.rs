//! Send command - publish a carrier message with the latest secret hidden in it.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use zwsp::relay::{PayloadSource, ReadingLog, Sender, StaticSource, TcpPublisher};
use zwsp::Mode;

use super::{load_config, runtime, CommandExecutor};

/// Send a visible message to a receiver with a secret appended invisibly.
///
/// The secret is either given directly (--secret) or taken from the newest
/// entry of a JSON-lines readings file (--readings).
#[derive(Args, Debug)]
pub struct SendCommand {
    /// Visible message text
    #[arg(short, long)]
    pub carrier: String,

    /// Secret to hide (mutually exclusive with --readings)
    #[arg(short, long, conflicts_with = "readings", required_unless_present = "readings")]
    pub secret: Option<String>,

    /// JSON-lines file of {"timestamp", "temperature"} readings; the newest is hidden
    #[arg(short, long, conflicts_with = "secret")]
    pub readings: Option<PathBuf>,

    /// Relay config file (TOML). ZWSP_* environment variables override it.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the codec mode from the config
    #[arg(long)]
    pub mode: Option<Mode>,
}

impl CommandExecutor for SendCommand {
    fn execute(&self) -> Result<()> {
        match (&self.secret, &self.readings) {
            (Some(secret), _) => self.send_with(StaticSource(secret.clone())),
            (None, Some(path)) => self.send_with(ReadingLog::new(path)),
            (None, None) => anyhow::bail!("Provide --secret or --readings"),
        }
    }
}

impl SendCommand {
    fn send_with<S: PayloadSource>(&self, source: S) -> Result<()> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(mode) = self.mode {
            config.mode = mode;
        }

        runtime()?.block_on(async {
            let publisher = TcpPublisher::connect(&config)
                .await
                .with_context(|| format!("Failed to connect to receiver at {}", config.address()))?;

            let mut sender = Sender::new(source, publisher, config.topic.clone(), config.mode);
            let receipt = sender.send(&self.carrier).await.context("Failed to send message")?;

            sender
                .into_publisher()
                .close()
                .await
                .context("Failed to close connection")?;

            println!("{}", serde_json::to_string(&receipt)?);
            Ok::<(), anyhow::Error>(())
        })
    }
}
