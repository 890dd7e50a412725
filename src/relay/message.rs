//! Messages exchanged between sender, receiver and observers.
//!
//! Everything is JSON. Frames travel over the transport; receipts and
//! records are what callers and observers see.

use serde::{Deserialize, Serialize};

use crate::decoder::Decoded;

/// A frame on the relay connection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Frame {
    /// First frame of every connection.
    Connect {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        username: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },

    /// An opaque string payload published on a topic.
    Publish { topic: String, payload: String },
}

impl Frame {
    /// Creates a publish frame.
    pub fn publish(topic: impl Into<String>, payload: impl Into<String>) -> Self {
        Frame::Publish {
            topic: topic.into(),
            payload: payload.into(),
        }
    }

    /// Serialize to bytes for transport.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Deserialize from bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

/// What the sender reports after publishing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SendReceipt {
    /// Visible carrier text supplied by the caller.
    pub original_message: String,
    /// Carrier followed by the invisible secret, as published.
    pub encoded_message: String,
}

/// A decoded message as pushed to observers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecodedRecord {
    /// The raw payload as received.
    pub encoded_message: String,
    /// Carrier text followed by the hidden text.
    pub decoded_message: String,
    /// The hidden text alone.
    pub hidden_message: String,
    /// The carrier text alone.
    pub carrier_message: String,
}

impl DecodedRecord {
    /// Builds a record from a raw payload and its decoded parts.
    pub fn from_decoded(raw: impl Into<String>, decoded: Decoded) -> Self {
        let decoded_message = decoded.combined();
        let (hidden_message, carrier_message) = decoded.into_parts();

        Self {
            encoded_message: raw.into(),
            decoded_message,
            hidden_message,
            carrier_message,
        }
    }

    /// Serialize as a single JSON line.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
