use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rand::Rng;
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::application::ports::{AccountSource, FetchError, FetchResult};
use crate::domain::{AccountId, Post, SocialAccount};

/// Configuration for the seeded account source
#[derive(Debug, Clone)]
pub struct SeedSourceConfig {
    /// Minimum time a fetch takes to resolve
    pub latency: Duration,
    /// Extra random delay added on top of the base latency
    pub jitter: Duration,
    /// Seed data returned by every fetch
    pub accounts: Vec<SocialAccount>,
}

impl Default for SeedSourceConfig {
    fn default() -> Self {
        SeedSourceConfig {
            latency: Duration::from_millis(800),
            jitter: Duration::ZERO,
            accounts: default_accounts(),
        }
    }
}

impl SeedSourceConfig {
    /// Zero-latency configuration for tests
    pub fn instant() -> Self {
        Self::default().with_latency(Duration::ZERO)
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn with_jitter(mut self, jitter: Duration) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_accounts(mut self, accounts: Vec<SocialAccount>) -> Self {
        self.accounts = accounts;
        self
    }
}

/// In-memory account source that stands in for a real backend
///
/// Every fetch waits out the configured latency and then returns a
/// deep copy of the seed, so callers can never reach the seed through
/// a returned value and a reload always resets to the same content.
/// Failures are injected per instance for exercising the error path.
pub struct SeedAccountSource {
    config: SeedSourceConfig,
    failure: Mutex<Option<FetchError>>,
    fetches: AtomicU64,
}

impl SeedAccountSource {
    /// Source with the canonical two-account fixture and default latency
    pub fn with_defaults() -> Self {
        Self::with_config(SeedSourceConfig::default())
    }

    pub fn with_config(config: SeedSourceConfig) -> Self {
        SeedAccountSource {
            config,
            failure: Mutex::new(None),
            fetches: AtomicU64::new(0),
        }
    }

    /// Make every subsequent fetch fail until cleared with `None`
    pub fn set_failure(&self, failure: Option<FetchError>) {
        *self.failure.lock() = failure;
    }

    /// How many fetches this source has served
    pub fn fetch_count(&self) -> u64 {
        self.fetches.load(Ordering::SeqCst)
    }

    fn delay(&self) -> Duration {
        let jitter_ms = self.config.jitter.as_millis() as u64;
        if jitter_ms == 0 {
            return self.config.latency;
        }
        let extra = rand::thread_rng().gen_range(0..=jitter_ms);
        self.config.latency + Duration::from_millis(extra)
    }
}

#[async_trait]
impl AccountSource for SeedAccountSource {
    async fn fetch(&self) -> FetchResult {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let delay = self.delay();
        if !delay.is_zero() {
            sleep(delay).await;
        }

        if let Some(failure) = self.failure.lock().clone() {
            warn!(%failure, "injected fetch failure");
            return Err(failure);
        }

        debug!(count = self.config.accounts.len(), "serving seed accounts");
        Ok(self.config.accounts.clone())
    }
}

const SEED_DESCRIPTION: &str = "We're excited to announce the launch of our new product. \
     This is a great opportunity to showcase our latest features and benefits.";

fn seed_date() -> NaiveDate {
    // Known-valid literal
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// The canonical seed: two accounts, three posts each
pub fn default_accounts() -> Vec<SocialAccount> {
    vec![
        SocialAccount::new(AccountId::from("1"), "Twitter", 12000, dec!(4.5)).with_posts(vec![
            Post::new("New product launch thread", SEED_DESCRIPTION, seed_date()).with_views(500),
            Post::new("Weekly tips #5", SEED_DESCRIPTION, seed_date()).with_views(1000),
            Post::new("AMA recap", SEED_DESCRIPTION, seed_date()).with_views(69),
        ]),
        SocialAccount::new(AccountId::from("2"), "Instagram", 45000, dec!(22)).with_posts(vec![
            Post::new("Sunset at the beach", SEED_DESCRIPTION, seed_date()).with_views(233),
            Post::new("Behind the scenes", SEED_DESCRIPTION, seed_date()).with_views(231),
            Post::new("Collaboration announcement", SEED_DESCRIPTION, seed_date()).with_views(111),
        ]),
    ]
}
