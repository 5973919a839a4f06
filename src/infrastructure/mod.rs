pub mod config;
pub mod event_sink;
pub mod sources;

pub use config::{ConfigError, StoreConfig};
pub use event_sink::BroadcastEventSink;
pub use sources::{SeedAccountSource, SeedSourceConfig, default_accounts};
