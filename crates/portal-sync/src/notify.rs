//! Notification bus for sync lifecycle events.
//!
//! The orchestrator publishes; observers subscribe for as long as they care
//! and unsubscribe by dropping their [`Subscription`].

use serde::Serialize;
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 16;

/// Lifecycle signals. Deliberately carry no error detail: observers only
/// learn that something failed and offer a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncEvent {
    /// A pipeline aborted; the rest of its drain cycle was discarded.
    Failed,
    /// A drain cycle ended. Published exactly once per cycle.
    Completed,
}

#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { tx }
    }

    /// Deliver `event` to every live subscription. No subscribers is fine.
    pub fn publish(&self, event: SyncEvent) {
        let delivered = self.tx.send(event).unwrap_or(0);
        tracing::debug!(?event, delivered, "published sync event");
    }

    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        Subscription {
            rx: self.tx.subscribe(),
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

/// A live subscription. Dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    rx: broadcast::Receiver<SyncEvent>,
}

impl Subscription {
    /// Wait for the next event. `None` once the bus is gone.
    ///
    /// A subscriber that fell behind skips the events it missed.
    pub async fn next(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "sync event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Blocking variant of [`Subscription::next`] for threads outside a runtime.
    pub fn blocking_next(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.blocking_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    tracing::warn!(missed, "sync event subscriber lagged");
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// An already-published event, if one is waiting.
    pub fn try_next(&mut self) -> Option<SyncEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(_)) => {}
                Err(_) => return None,
            }
        }
    }
}
