mod broadcast;

pub use broadcast::BroadcastEventSink;
