use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::AccountId;

/// Change notifications emitted by the account store
///
/// One event per effective state change; silent no-ops (unknown id,
/// out-of-range post index, dropped stale load) emit nothing. Delivery
/// is fire-and-forget: a consumer that falls behind or is absent does
/// not affect the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "camelCase")]
pub enum StoreEvent {
    /// A load completed and replaced the account list
    AccountsLoaded { count: usize, at: DateTime<Utc> },
    /// A load failed; the previous list is still in place
    LoadFailed { message: String, at: DateTime<Utc> },
    AccountAdded { id: AccountId, at: DateTime<Utc> },
    AccountUpdated { id: AccountId, at: DateTime<Utc> },
    AccountDeleted { id: AccountId, at: DateTime<Utc> },
    /// A post's view counter ticked up by one
    PostViewed {
        id: AccountId,
        post_index: usize,
        views: u64,
        at: DateTime<Utc>,
    },
}

impl StoreEvent {
    /// The account this event concerns, where there is one
    pub fn account_id(&self) -> Option<&AccountId> {
        match self {
            StoreEvent::AccountsLoaded { .. } | StoreEvent::LoadFailed { .. } => None,
            StoreEvent::AccountAdded { id, .. }
            | StoreEvent::AccountUpdated { id, .. }
            | StoreEvent::AccountDeleted { id, .. }
            | StoreEvent::PostViewed { id, .. } => Some(id),
        }
    }
}
