use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::broadcast;

use crate::application::ports::EventSink;
use crate::domain::StoreEvent;

/// Broadcast-based event sink
///
/// Fans store events out to any number of subscribers over a tokio
/// broadcast channel. Sending with no subscribers, or to a subscriber
/// that has lagged past the channel capacity, drops the event; the
/// store never blocks on its audience.
pub struct BroadcastEventSink {
    tx: broadcast::Sender<StoreEvent>,
    subscribers: Arc<AtomicUsize>,
}

impl BroadcastEventSink {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        BroadcastEventSink {
            tx,
            subscribers: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Subscribe to all store events from this point on
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.subscribers.fetch_add(1, Ordering::SeqCst);
        self.tx.subscribe()
    }

    /// Drop a subscription from the count
    pub fn unsubscribe(&self) {
        self.subscribers.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.load(Ordering::SeqCst)
    }
}

impl Default for BroadcastEventSink {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Clone for BroadcastEventSink {
    fn clone(&self) -> Self {
        BroadcastEventSink {
            tx: self.tx.clone(),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl EventSink for BroadcastEventSink {
    fn send(&self, event: StoreEvent) {
        // Ignore send errors (no subscribers)
        let _ = self.tx.send(event);
    }
}
