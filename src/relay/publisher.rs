//! Outbound side of the relay: publishing opaque string payloads on a topic.

use async_trait::async_trait;
use tracing::{debug, info};

use crate::relay::config::RelayConfig;
use crate::relay::error::RelayError;
use crate::relay::message::Frame;
use crate::relay::transport::{FrameTransport, TcpConnection};

/// Publishes payloads on a topic.
#[async_trait]
pub trait Publisher: Send {
    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), RelayError>;
}

/// Publishes over any [`FrameTransport`], opening with a connect frame.
pub struct TransportPublisher<T: FrameTransport> {
    transport: T,
}

impl<T: FrameTransport> TransportPublisher<T> {
    /// Sends the connect frame and returns a ready publisher.
    pub async fn start(
        mut transport: T,
        username: Option<String>,
        password: Option<String>,
    ) -> Result<Self, RelayError> {
        transport.send(&Frame::Connect { username, password }).await?;
        Ok(Self { transport })
    }

    /// Closes the underlying transport.
    pub async fn close(mut self) -> Result<(), RelayError> {
        self.transport.close().await
    }
}

#[async_trait]
impl<T: FrameTransport> Publisher for TransportPublisher<T> {
    async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), RelayError> {
        self.transport.send(&Frame::publish(topic, payload)).await?;
        debug!(topic, bytes = payload.len(), "Published payload");
        Ok(())
    }
}

/// TCP publisher.
pub type TcpPublisher = TransportPublisher<TcpConnection>;

impl TcpPublisher {
    /// Connects to the receiver named in `config`.
    pub async fn connect(config: &RelayConfig) -> Result<Self, RelayError> {
        let address = config.address();
        let connection = TcpConnection::connect(address.as_str()).await?;
        info!(%address, "Connected to receiver");

        Self::start(connection, config.username.clone(), config.password.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relay::transport::{FrameListener, TcpListener};

    #[tokio::test]
    async fn test_connect_then_publish() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let config = RelayConfig {
            host: addr.ip().to_string(),
            port: addr.port(),
            username: Some("admin".to_string()),
            password: Some("secret".to_string()),
            ..Default::default()
        };

        let client = tokio::spawn(async move {
            let mut publisher = TcpPublisher::connect(&config).await.unwrap();
            publisher.publish("zwsp", "payload").await.unwrap();
            publisher.close().await.unwrap();
        });

        let (mut conn, _) = listener.accept().await.unwrap();
        assert_eq!(
            conn.receive().await.unwrap(),
            Frame::Connect {
                username: Some("admin".to_string()),
                password: Some("secret".to_string()),
            }
        );
        assert_eq!(conn.receive().await.unwrap(), Frame::publish("zwsp", "payload"));

        client.await.unwrap();
    }
}
