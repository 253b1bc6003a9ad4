//! Event bus core implementation
//!
//! # Message flow
//!
//! ```text
//! Service ──▶ publish() ──▶ broadcast::Sender<BusEvent> ──┬──▶ subscriber
//!                                                         ├──▶ subscriber
//!                                                         └──▶ subscriber
//! ```
//!
//! Events are published after the owning service has committed its write
//! section. Lagging subscribers miss events (broadcast semantics); they can
//! detect gaps through the per-resource version on each event.

use shared::event::BusEvent;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Event bus - fan-out of entity-change events
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<BusEvent>,
    shutdown_token: CancellationToken,
}

impl EventBus {
    /// Create a bus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self {
            tx,
            shutdown_token: CancellationToken::new(),
        }
    }

    /// Publish an event to all subscribers
    ///
    /// Having no subscribers is not an error; the event is simply dropped.
    pub fn publish(&self, event: BusEvent) {
        tracing::debug!(kind = %event.kind, version = event.version, "Publishing event");
        if self.tx.send(event).is_err() {
            tracing::debug!("Event dropped: no active subscribers");
        }
    }

    /// Subscribe to the event stream
    pub fn subscribe(&self) -> broadcast::Receiver<BusEvent> {
        self.tx.subscribe()
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Token observed by long-running subscribers to stop on shutdown
    pub fn shutdown_token(&self) -> &CancellationToken {
        &self.shutdown_token
    }

    /// Signal shutdown to all subscribers
    pub fn shutdown(&self) {
        tracing::info!("Shutting down event bus");
        self.shutdown_token.cancel();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}
