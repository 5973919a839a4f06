//! Social Store
//!
//! The state core of a social-media dashboard: an in-memory account
//! store fed by a simulated data source.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture with clear separation of concerns:
//!
//! - **Domain**: Entities and rules (SocialAccount, Post, validation, queries)
//! - **Application**: Port interfaces and the state container
//!   (AccountSource, EventSink, AccountStore, ViewTracker)
//! - **Infrastructure**: Implementations of ports (SeedAccountSource,
//!   BroadcastEventSink, JSON config loading)
//!
//! # Features
//!
//! - Load lifecycle with stale-result fencing (the most recently issued
//!   load wins, regardless of resolution order)
//! - Total, silently-degrading mutations, safe against racy UI events
//! - Once-per-mount view counting driven by viewport visibility signals
//! - Change events broadcast to any number of subscribers
//! - Simulated fetch latency, configurable down to zero for tests
//!
//! # Example
//!
//! ```ignore
//! use social_store::{Dashboard, StoreConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let dashboard = Dashboard::new(StoreConfig::default());
//!     dashboard.store.load().await;
//!     let state = dashboard.store.snapshot();
//!     println!("{} accounts", state.accounts.len());
//! }
//! ```

pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use domain::{
    AccountId, AccountValidator, EngagementTier, OverviewStats, Post, PostDraft, SocialAccount,
    StoreEvent, ValidationError, normalize_posts, search,
};

pub use application::{
    AccountSource, AccountStore, EventSink, FetchError, FetchResult, MountId, NullEventSink,
    StoreState, VIEW_THRESHOLD, ViewTracker,
};

pub use infrastructure::{
    BroadcastEventSink, ConfigError, SeedAccountSource, SeedSourceConfig, StoreConfig,
    default_accounts,
};

use std::sync::Arc;

/// The fully wired dashboard state core
///
/// Composition root for the default setup: a seeded source, a
/// broadcast event sink, the store and its view tracker, all built
/// from one [`StoreConfig`] at process start. Consumers hold the
/// `Arc`ed store (and tracker) by reference; there is no teardown,
/// state lives as long as the process.
pub struct Dashboard {
    pub config: StoreConfig,
    pub source: Arc<SeedAccountSource>,
    pub events: Arc<BroadcastEventSink>,
    pub store: Arc<AccountStore<SeedAccountSource, BroadcastEventSink>>,
    pub tracker: ViewTracker<SeedAccountSource, BroadcastEventSink>,
}

impl Dashboard {
    /// Wire up the store from configuration
    pub fn new(config: StoreConfig) -> Self {
        let source = Arc::new(SeedAccountSource::with_config(config.source_config()));
        let events = Arc::new(BroadcastEventSink::new(config.event_capacity));
        let store = Arc::new(AccountStore::new(Arc::clone(&source), Arc::clone(&events)));
        let tracker = ViewTracker::new(Arc::clone(&store));

        Dashboard {
            config,
            source,
            events,
            store,
            tracker,
        }
    }

    /// Subscribe to store change events
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}
