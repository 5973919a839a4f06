use crate::domain::StoreEvent;

/// Outlet for store change notifications
///
/// Sends are synchronous and infallible from the store's point of
/// view: mutations run inside a lock and must not suspend, and a
/// missing audience is not an error.
pub trait EventSink: Send + Sync {
    /// Deliver an event to whoever is listening, if anyone
    fn send(&self, event: StoreEvent);
}

/// Sink that discards everything, for wiring that has no subscribers
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send(&self, _event: StoreEvent) {}
}
