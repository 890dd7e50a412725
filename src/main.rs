//! zwsp - hide text inside text
//!
//! A CLI for zero-width steganography: encode and decode locally, or run a
//! sender/receiver pair that relays hidden messages over TCP.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CommandExecutor, DecodeCommand, EncodeCommand, ReceiveCommand, SendCommand};

/// zwsp - hide text inside text
///
/// Secrets are written as zero-width characters that render as nothing.
/// There is no encryption: the secret is invisible, not confidential.
#[derive(Parser)]
#[command(name = "zwsp")]
#[command(version)]
#[command(about = "Hide text inside text with zero-width characters")]
#[command(long_about = None)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a secret message as zero-width characters
    Encode(EncodeCommand),

    /// Decode hidden text from a message
    Decode(DecodeCommand),

    /// Send a message with the latest secret hidden in it
    Send(SendCommand),

    /// Receive, decode and print hidden messages
    Receive(ReceiveCommand),
}

impl Commands {
    fn executor(&self) -> &dyn CommandExecutor {
        match self {
            Commands::Encode(cmd) => cmd,
            Commands::Decode(cmd) => cmd,
            Commands::Send(cmd) => cmd,
            Commands::Receive(cmd) => cmd,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    cli.command.executor().execute()
}

/// Logs go to stderr so stdout carries only encoded text and JSON records.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
