//! Push fan-out of decoded records to connected observers.

use tokio::sync::broadcast;
use tracing::debug;

use crate::relay::message::DecodedRecord;

/// Default number of records buffered per observer before it starts lagging.
pub const DEFAULT_CAPACITY: usize = 64;

/// Broadcasts every decoded record to all current observers.
///
/// Cloning a `Hub` yields another handle onto the same channel.
#[derive(Debug, Clone)]
pub struct Hub {
    sender: broadcast::Sender<DecodedRecord>,
}

impl Hub {
    /// Creates a hub buffering up to `capacity` records per observer.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Registers a new observer. It only sees records broadcast after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<DecodedRecord> {
        self.sender.subscribe()
    }

    /// Sends `record` to every observer and returns how many were reached.
    ///
    /// With nobody listening the record is dropped and 0 is returned.
    pub fn broadcast(&self, record: DecodedRecord) -> usize {
        match self.sender.send(record) {
            Ok(reached) => {
                debug!(observers = reached, "Broadcast decoded record");
                reached
            }
            Err(_) => {
                debug!("No observers connected, record dropped");
                0
            }
        }
    }

    /// Number of observers currently subscribed.
    pub fn observer_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for Hub {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
