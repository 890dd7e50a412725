//! Relay error types.

use thiserror::Error;

use crate::decoder::DecoderError;
use crate::encoder::EncoderError;

/// Errors that can occur while sending, relaying or receiving messages.
#[derive(Error, Debug)]
pub enum RelayError {
    /// Hiding the secret failed.
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncoderError),

    /// The received payload is not a validly encoded message.
    #[error("Decoding failed: {0}")]
    Decoding(#[from] DecoderError),

    /// The secret payload could not be looked up.
    #[error("Payload source error: {0}")]
    Source(String),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Frame could not be serialized or parsed.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Peer sent a frame that is not valid at this point.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Connect credentials did not match.
    #[error("Authentication failed for user '{0}'")]
    AuthenticationFailed(String),

    /// Transport error.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Peer closed the connection.
    #[error("Connection closed")]
    ConnectionClosed,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
