//! Consumer side: decode incoming payloads and push the results to observers.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::decoder::{decode, DecoderError};
use crate::mode::Mode;
use crate::relay::config::{Credentials, RelayConfig};
use crate::relay::error::RelayError;
use crate::relay::hub::Hub;
use crate::relay::message::{DecodedRecord, Frame};
use crate::relay::transport::{FrameListener, FrameTransport};

/// Consecutive accept failures after which [`Receiver::serve`] gives up.
pub const MAX_ACCEPT_FAILURES: u32 = 5;

/// Pause between accept attempts after a failure.
pub const ACCEPT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Decodes payloads and broadcasts a [`DecodedRecord`] for each valid one.
#[derive(Debug, Clone)]
pub struct Receiver {
    mode: Mode,
    hub: Hub,
    credentials: Option<Credentials>,
}

impl Receiver {
    pub fn new(mode: Mode, hub: Hub) -> Self {
        Self {
            mode,
            hub,
            credentials: None,
        }
    }

    /// Receiver with mode and credentials taken from `config`.
    pub fn from_config(config: &RelayConfig, hub: Hub) -> Self {
        Self {
            mode: config.mode,
            hub,
            credentials: config.credentials(),
        }
    }

    /// Requires every connection to present these credentials.
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn hub(&self) -> &Hub {
        &self.hub
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Decodes `payload`, broadcasts the record and returns it.
    ///
    /// A payload that does not decode is returned as an error and nothing is
    /// broadcast.
    pub fn receive(&self, payload: &str) -> Result<DecodedRecord, RelayError> {
        let decoded = decode(payload, self.mode)?;
        Ok(self.publish_record(DecodedRecord::from_decoded(payload, decoded)))
    }

    /// Like [`Receiver::receive`] for payloads that arrive as raw bytes.
    /// Bytes that are not UTF-8 fail with [`DecoderError::NotText`].
    pub fn receive_bytes(&self, payload: &[u8]) -> Result<DecodedRecord, RelayError> {
        let payload = std::str::from_utf8(payload).map_err(DecoderError::NotText)?;
        self.receive(payload)
    }

    fn publish_record(&self, record: DecodedRecord) -> DecodedRecord {
        debug!(
            encoded_message = %record.encoded_message,
            decoded_message = %record.decoded_message,
            hidden_message = %record.hidden_message,
            carrier_message = %record.carrier_message,
            "Decoded message"
        );
        self.hub.broadcast(record.clone());
        record
    }

    /// Accepts connections, one task per connection.
    ///
    /// A failed accept is logged and retried after [`ACCEPT_RETRY_DELAY`].
    /// After [`MAX_ACCEPT_FAILURES`] failures in a row the last error is
    /// returned and no further connections are accepted.
    pub async fn serve<L>(self, listener: L, topic: impl Into<String>) -> Result<(), RelayError>
    where
        L: FrameListener,
    {
        let receiver = Arc::new(self);
        let topic: Arc<str> = Arc::from(topic.into());
        let mut failures = 0;

        loop {
            let (connection, peer) = match listener.accept().await {
                Ok(accepted) => {
                    failures = 0;
                    accepted
                }
                Err(e) => {
                    failures += 1;
                    if failures >= MAX_ACCEPT_FAILURES {
                        error!(error = %e, failures, "Giving up on accepting connections");
                        return Err(e);
                    }
                    warn!(error = %e, failures, "Accept error");
                    tokio::time::sleep(ACCEPT_RETRY_DELAY).await;
                    continue;
                }
            };
            info!(%peer, "Connection accepted");

            let receiver = Arc::clone(&receiver);
            let topic = Arc::clone(&topic);
            tokio::spawn(async move {
                match receiver.handle_connection(connection, &topic).await {
                    Ok(()) => info!(%peer, "Connection closed"),
                    Err(e) => warn!(%peer, error = %e, "Connection dropped"),
                }
            });
        }
    }

    /// Runs one connection: authenticate, then decode every publish frame on `topic`.
    pub async fn handle_connection<T: FrameTransport>(
        &self,
        mut transport: T,
        topic: &str,
    ) -> Result<(), RelayError> {
        match transport.receive().await? {
            Frame::Connect { username, password } => self.authenticate(username, password)?,
            other => {
                return Err(RelayError::Protocol(format!(
                    "Expected connect frame, got {:?}",
                    other
                )))
            }
        }

        loop {
            let frame = match transport.receive().await {
                Ok(frame) => frame,
                Err(RelayError::ConnectionClosed) => return Ok(()),
                Err(e) => return Err(e),
            };

            match frame {
                Frame::Publish {
                    topic: frame_topic,
                    payload,
                } if frame_topic == topic => {
                    info!(topic = %frame_topic, "Received message");
                    if let Err(e) = self.receive(&payload) {
                        warn!(error = %e, "Discarding message that does not decode");
                    }
                }
                Frame::Publish { topic: other, .. } => {
                    debug!(topic = %other, "Ignoring message on unsubscribed topic");
                }
                Frame::Connect { .. } => {
                    return Err(RelayError::Protocol("Duplicate connect frame".to_string()))
                }
            }
        }
    }

    fn authenticate(
        &self,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<(), RelayError> {
        let Some(expected) = &self.credentials else {
            return Ok(());
        };

        let username = username.unwrap_or_default();
        let password = password.unwrap_or_default();
        if username == expected.username && password == expected.password {
            Ok(())
        } else {
            Err(RelayError::AuthenticationFailed(username))
        }
    }
}
