//! Configuration loading for the dashboard state core
//!
//! Supports JSON configuration files for:
//! - Fetch latency and jitter of the simulated data source
//! - Event channel capacity
//! - Seed accounts (the built-in fixture is used when omitted)

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::domain::SocialAccount;
use crate::infrastructure::sources::{SeedSourceConfig, default_accounts};

/// Root configuration for wiring the store and its collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Minimum fetch latency in milliseconds
    #[serde(default = "default_latency_ms")]
    pub fetch_latency_ms: u64,

    /// Extra random fetch delay in milliseconds
    #[serde(default)]
    pub fetch_jitter_ms: u64,

    /// Capacity of the store event broadcast channel
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Seed accounts served by the source; the built-in fixture when absent
    #[serde(default)]
    pub accounts: Option<Vec<SocialAccount>>,
}

fn default_latency_ms() -> u64 {
    800
}

fn default_event_capacity() -> usize {
    256
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            fetch_latency_ms: default_latency_ms(),
            fetch_jitter_ms: 0,
            event_capacity: default_event_capacity(),
            accounts: None,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;

        Self::from_json(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Translate into the source's own configuration
    pub fn source_config(&self) -> SeedSourceConfig {
        SeedSourceConfig {
            latency: Duration::from_millis(self.fetch_latency_ms),
            jitter: Duration::from_millis(self.fetch_jitter_ms),
            accounts: self.accounts.clone().unwrap_or_else(default_accounts),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ConfigError {
    Io { path: String, error: String },
    Parse(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io { path, error } => {
                write!(f, "Failed to read config file '{}': {}", path, error)
            }
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
        }
    }
}

impl std::error::Error for ConfigError {}
