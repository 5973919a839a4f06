use async_trait::async_trait;
use thiserror::Error;

use crate::domain::SocialAccount;

/// Failures a fetch can surface to the store
///
/// This is the only error kind that crosses the store boundary; the
/// store converts it into its `error` state field rather than letting
/// it escape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Network error")]
    Network,

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

pub type FetchResult = Result<Vec<SocialAccount>, FetchError>;

/// Read-only source of account data
///
/// The single suspension point in the system. Implementations must
/// return data the caller owns outright: mutating a fetched list must
/// never be observable through a later fetch.
#[async_trait]
pub trait AccountSource: Send + Sync {
    /// Fetch the full account list
    async fn fetch(&self) -> FetchResult;
}
