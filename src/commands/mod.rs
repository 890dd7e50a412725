//! Command module - Strategy pattern for CLI commands.
//!
//! Each command is a separate module implementing the `CommandExecutor` trait.

mod decode;
mod encode;
mod receive;
mod send;

pub use decode::DecodeCommand;
pub use encode::EncodeCommand;
pub use receive::ReceiveCommand;
pub use send::SendCommand;

use std::path::Path;

use anyhow::{Context, Result};

use zwsp::relay::RelayConfig;

/// Trait for command execution - Strategy pattern.
///
/// Each command struct holds its parsed arguments and implements
/// this trait to define its execution logic.
pub trait CommandExecutor {
    /// Executes the command with its parsed arguments.
    fn execute(&self) -> Result<()>;
}

/// Loads the relay config from `path` (or defaults), then applies `ZWSP_*`
/// environment overrides.
fn load_config(path: Option<&Path>) -> Result<RelayConfig> {
    let config = match path {
        Some(path) => RelayConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => RelayConfig::default(),
    };

    config
        .apply_env()
        .context("Invalid ZWSP_* environment override")
}

/// Builds the runtime async commands block on.
fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new().context("Failed to create tokio runtime")
}
