//! # Relay
//!
//! The pieces around the codec that move hidden messages between two
//! processes:
//!
//! - a [`Sender`] looks up the current secret from a [`PayloadSource`],
//!   appends its invisible encoding to a visible message and publishes the
//!   result on a topic;
//! - a [`Receiver`] accepts published payloads, decodes them and pushes a
//!   [`DecodedRecord`] to every observer subscribed to its [`Hub`].
//!
//! Payloads cross the wire as opaque strings inside JSON [`Frame`]s. The
//! codec itself never touches the network.

mod config;
mod error;
mod hub;
mod message;
mod publisher;
mod receiver;
mod sender;
mod source;
pub mod transport;

pub use config::{Credentials, RelayConfig, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_TOPIC};
pub use error::RelayError;
pub use hub::Hub;
pub use message::{DecodedRecord, Frame, SendReceipt};
pub use publisher::{Publisher, TcpPublisher, TransportPublisher};
pub use receiver::{Receiver, ACCEPT_RETRY_DELAY, MAX_ACCEPT_FAILURES};
pub use sender::{assemble, Sender};
pub use source::{PayloadSource, Reading, ReadingLog, StaticSource};
