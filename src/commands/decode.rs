//! Decode command - split a message into its hidden and visible parts.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use zwsp::relay::DecodedRecord;
use zwsp::{decode, Mode};

use super::CommandExecutor;

/// Decode a message that may contain zero-width hidden text.
///
/// Input can be provided as:
/// - Direct text: --text "..."
/// - Text file: --file message.txt
/// - Standard input (when neither is given)
#[derive(Args, Debug)]
pub struct DecodeCommand {
    /// Message to decode (direct text)
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the message from a file
    #[arg(short, long, conflicts_with = "text")]
    pub file: Option<PathBuf>,

    /// Codec mode: zwsp (3 symbols) or full (5 symbols)
    #[arg(long, default_value = "zwsp")]
    pub mode: Mode,

    /// Print the full decoded record as JSON
    #[arg(long)]
    pub json: bool,
}

impl CommandExecutor for DecodeCommand {
    fn execute(&self) -> Result<()> {
        let input = self.read_input()?;

        let decoded = decode(&input, self.mode)
            .with_context(|| format!("Input is not a valid {} message", self.mode))?;

        if self.json {
            let record = DecodedRecord::from_decoded(input, decoded);
            println!("{}", record.to_json()?);
        } else {
            println!("Hidden:  {}", decoded.hidden);
            println!("Carrier: {}", decoded.carrier);
        }

        Ok(())
    }
}

impl DecodeCommand {
    fn read_input(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(strip_line_ending(content));
        }

        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read message from stdin")?;
        Ok(strip_line_ending(buffer))
    }
}

/// Drops one trailing newline added by editors and `echo`.
fn strip_line_ending(mut text: String) -> String {
    if text.ends_with('\n') {
        text.pop();
        if text.ends_with('\r') {
            text.pop();
        }
    }
    text
}
