//! Producer side: hide the latest secret behind a visible message and publish it.

use tracing::debug;

use crate::encoder::encode;
use crate::mode::Mode;
use crate::relay::error::RelayError;
use crate::relay::message::SendReceipt;
use crate::relay::publisher::Publisher;
use crate::relay::source::PayloadSource;

/// Publishes carrier messages with the current secret appended invisibly.
pub struct Sender<S, P> {
    source: S,
    publisher: P,
    topic: String,
    mode: Mode,
}

impl<S, P> Sender<S, P>
where
    S: PayloadSource,
    P: Publisher,
{
    pub fn new(source: S, publisher: P, topic: impl Into<String>, mode: Mode) -> Self {
        Self {
            source,
            publisher,
            topic: topic.into(),
            mode,
        }
    }

    /// Builds `carrier + encode(secret)`, publishes it and reports what was sent.
    pub async fn send(&mut self, carrier: &str) -> Result<SendReceipt, RelayError> {
        let secret = self.source.latest()?;
        let encoded = assemble(carrier, &secret, self.mode)?;

        debug!(
            original = carrier,
            hidden = %secret,
            encoded_chars = encoded.chars().count(),
            "Assembled message"
        );

        self.publisher.publish(&self.topic, &encoded).await?;

        Ok(SendReceipt {
            original_message: carrier.to_string(),
            encoded_message: encoded,
        })
    }

    /// Gives the publisher back, e.g. to close it.
    pub fn into_publisher(self) -> P {
        self.publisher
    }
}

/// Appends the invisible encoding of `secret` to `carrier`.
pub fn assemble(carrier: &str, secret: &str, mode: Mode) -> Result<String, RelayError> {
    let hidden = encode(secret, mode)?;
    let mut message = String::with_capacity(carrier.len() + hidden.len());
    message.push_str(carrier);
    message.push_str(&hidden);
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::decode;
    use crate::relay::source::StaticSource;
    use async_trait::async_trait;

    #[derive(Default)]
    struct RecordingPublisher {
        published: Vec<(String, String)>,
    }

    #[async_trait]
    impl Publisher for RecordingPublisher {
        async fn publish(&mut self, topic: &str, payload: &str) -> Result<(), RelayError> {
            self.published.push((topic.to_string(), payload.to_string()));
            Ok(())
        }
    }

    struct FailingSource;

    impl PayloadSource for FailingSource {
        fn latest(&self) -> Result<String, RelayError> {
            Err(RelayError::Source("store unavailable".to_string()))
        }
    }

    #[test]
    fn test_assemble_appends_hidden() {
        let message = assemble("Hello", "23", Mode::Zwsp).unwrap();
        assert!(message.starts_with("Hello"));
        assert_eq!(message.chars().count(), 5 + 2 * 11);

        let decoded = decode(&message, Mode::Zwsp).unwrap();
        assert_eq!(decoded.hidden, "23");
        assert_eq!(decoded.carrier, "Hello");
    }

    #[test]
    fn test_assemble_empty_secret() {
        assert_eq!(assemble("Hello", "", Mode::Zwsp).unwrap(), "Hello");
    }

    #[tokio::test]
    async fn test_send_publishes_on_topic() {
        let mut sender = Sender::new(
            StaticSource("31".to_string()),
            RecordingPublisher::default(),
            "zwsp",
            Mode::Zwsp,
        );

        let receipt = sender.send("Nice weather").await.unwrap();
        assert_eq!(receipt.original_message, "Nice weather");

        let publisher = sender.into_publisher();
        assert_eq!(publisher.published.len(), 1);
        assert_eq!(publisher.published[0].0, "zwsp");
        assert_eq!(publisher.published[0].1, receipt.encoded_message);
    }

    #[tokio::test]
    async fn test_source_failure_publishes_nothing() {
        let mut sender = Sender::new(
            FailingSource,
            RecordingPublisher::default(),
            "zwsp",
            Mode::Zwsp,
        );

        assert!(matches!(
            sender.send("hi").await,
            Err(RelayError::Source(_))
        ));
        assert!(sender.into_publisher().published.is_empty());
    }

    #[tokio::test]
    async fn test_unrepresentable_secret() {
        let mut sender = Sender::new(
            StaticSource("😀".to_string()),
            RecordingPublisher::default(),
            "zwsp",
            Mode::Full,
        );

        assert!(matches!(
            sender.send("hi").await,
            Err(RelayError::Encoding(_))
        ));
    }
}
