//! Encode command - hide a message behind visible carrier text.

use anyhow::{Context, Result};
use clap::Args;

use zwsp::{encode, Mode};

use super::CommandExecutor;

/// Encode a secret message as zero-width characters.
///
/// The output is the carrier text (if any) followed by the invisible
/// encoding. Paste it anywhere; it reads as the carrier alone.
#[derive(Args, Debug)]
pub struct EncodeCommand {
    /// Secret message to hide
    #[arg(short, long)]
    pub message: String,

    /// Visible text to put in front of the hidden message
    #[arg(short, long, default_value = "")]
    pub carrier: String,

    /// Codec mode: zwsp (3 symbols) or full (5 symbols)
    #[arg(long, default_value = "zwsp")]
    pub mode: Mode,

    /// Print zero-width characters as \u{...} escapes so they can be seen
    #[arg(long)]
    pub escape: bool,
}

impl CommandExecutor for EncodeCommand {
    fn execute(&self) -> Result<()> {
        let hidden = encode(&self.message, self.mode)
            .with_context(|| format!("Failed to encode message in {} mode", self.mode))?;

        tracing::debug!(
            mode = %self.mode,
            chars = self.message.chars().count(),
            encoded_chars = hidden.chars().count(),
            "Encoded message"
        );

        let output = format!("{}{}", self.carrier, hidden);
        if self.escape {
            println!("{}", escape_invisible(&output, self.mode));
        } else {
            println!("{}", output);
        }

        Ok(())
    }
}

/// Replaces every alphabet character with its `\u{XXXX}` escape.
pub(crate) fn escape_invisible(text: &str, mode: Mode) -> String {
    text.chars()
        .map(|c| {
            if mode.contains(c) {
                format!("\\u{{{:04X}}}", c as u32)
            } else {
                c.to_string()
            }
        })
        .collect()
}
