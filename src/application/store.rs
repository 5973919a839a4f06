use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

use crate::application::ports::{AccountSource, EventSink};
use crate::domain::{AccountId, SocialAccount, StoreEvent};

/// Snapshot of everything the view layer renders from
///
/// `loading` and `error` are phases of the load lifecycle: starting a
/// load raises `loading` and clears `error` before the outcome is
/// known, so the two are never both meaningful at once. The account
/// list always reflects the most recent successful load, as modified
/// by the synchronous mutations since.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreState {
    pub accounts: Vec<SocialAccount>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for StoreState {
    fn default() -> Self {
        // The dashboard opens into its first load, so the initial
        // state is already "loading" with nothing to show.
        StoreState {
            accounts: Vec::new(),
            loading: true,
            error: None,
        }
    }
}

/// The single owner of dashboard account state
///
/// Constructed once at process start and shared by handle; consumers
/// read via [`snapshot`](AccountStore::snapshot) and mutate only
/// through the operations below. Mutations are synchronous, total and
/// run to completion under one write lock, so no partial change is
/// ever observable. The asynchronous [`load`](AccountStore::load) is
/// the only suspension point.
pub struct AccountStore<S, E> {
    source: Arc<S>,
    events: Arc<E>,
    state: RwLock<StoreState>,
    /// Monotonic ticket for load fencing: only the most recently
    /// issued load may apply its result.
    load_seq: AtomicU64,
}

impl<S, E> AccountStore<S, E>
where
    S: AccountSource,
    E: EventSink,
{
    pub fn new(source: Arc<S>, events: Arc<E>) -> Self {
        AccountStore {
            source,
            events,
            state: RwLock::new(StoreState::default()),
            load_seq: AtomicU64::new(0),
        }
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> StoreState {
        self.state.read().clone()
    }

    /// Look up a single account by id
    pub fn account(&self, id: &AccountId) -> Option<SocialAccount> {
        self.state.read().accounts.iter().find(|a| &a.id == id).cloned()
    }

    /// Whether an account with this id is currently in the list
    ///
    /// Offered for callers that want to rule out a duplicate id before
    /// an add; the store itself does not check.
    pub fn contains(&self, id: &AccountId) -> bool {
        self.state.read().accounts.iter().any(|a| &a.id == id)
    }

    pub fn len(&self) -> usize {
        self.state.read().accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().accounts.is_empty()
    }

    /// Reload the account list from the source
    ///
    /// Raises `loading` and clears `error` immediately; the current
    /// list stays visible until the outcome arrives. On success the
    /// list is replaced wholesale; on failure the failure message
    /// lands in `error` and the list is left untouched.
    ///
    /// Overlapping calls are fenced: each load takes a ticket, and a
    /// result whose ticket is no longer the newest is dropped without
    /// touching state, so the most recently issued load determines the
    /// final state regardless of resolution order.
    pub async fn load(&self) {
        let ticket = self.load_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write();
            state.loading = true;
            state.error = None;
        }
        debug!(ticket, "loading accounts");

        let outcome = self.source.fetch().await;

        let event = {
            let mut state = self.state.write();
            if ticket != self.load_seq.load(Ordering::SeqCst) {
                debug!(ticket, "dropping stale load result");
                return;
            }

            match outcome {
                Ok(accounts) => {
                    debug!(ticket, count = accounts.len(), "accounts loaded");
                    state.loading = false;
                    state.error = None;
                    let count = accounts.len();
                    state.accounts = accounts;
                    StoreEvent::AccountsLoaded { count, at: Utc::now() }
                }
                Err(err) => {
                    warn!(ticket, %err, "account load failed");
                    state.loading = false;
                    state.error = Some(err.to_string());
                    StoreEvent::LoadFailed {
                        message: err.to_string(),
                        at: Utc::now(),
                    }
                }
            }
        };

        self.events.send(event);
    }

    /// Append a new account
    ///
    /// The caller generates the id beforehand (see
    /// [`AccountId::random`]); the store does not deduplicate, so
    /// passing an id that is already present is a caller error.
    pub fn add_account(&self, account: SocialAccount) {
        let id = account.id.clone();
        {
            let mut state = self.state.write();
            state.accounts.push(account);
        }
        debug!(%id, "account added");
        self.events.send(StoreEvent::AccountAdded { id, at: Utc::now() });
    }

    /// Replace the first account with a matching id wholesale
    ///
    /// Silently does nothing when the id is absent; edits race with
    /// deletes, and losing that race is not an error.
    pub fn update_account(&self, account: SocialAccount) {
        let id = account.id.clone();
        let replaced = {
            let mut state = self.state.write();
            match state.accounts.iter_mut().find(|a| a.id == id) {
                Some(slot) => {
                    *slot = account;
                    true
                }
                None => false,
            }
        };

        if replaced {
            debug!(%id, "account updated");
            self.events.send(StoreEvent::AccountUpdated { id, at: Utc::now() });
        } else {
            debug!(%id, "update ignored, unknown account");
        }
    }

    /// Remove every account with this id
    ///
    /// Silently does nothing when none match.
    pub fn delete_account(&self, id: &AccountId) {
        let removed = {
            let mut state = self.state.write();
            let before = state.accounts.len();
            state.accounts.retain(|a| &a.id != id);
            before != state.accounts.len()
        };

        if removed {
            debug!(%id, "account deleted");
            self.events.send(StoreEvent::AccountDeleted {
                id: id.clone(),
                at: Utc::now(),
            });
        } else {
            debug!(%id, "delete ignored, unknown account");
        }
    }

    /// Count one view on a single post
    ///
    /// Driven by viewport visibility signals, which can legitimately
    /// arrive after the account was deleted or its posts edited, so an
    /// unknown id or out-of-range index is ignored rather than raised.
    pub fn increment_post_views(&self, id: &AccountId, post_index: usize) {
        let views = {
            let mut state = self.state.write();
            state
                .accounts
                .iter_mut()
                .find(|a| &a.id == id)
                .and_then(|account| account.posts.get_mut(post_index))
                .map(|post| {
                    post.views += 1;
                    post.views
                })
        };

        match views {
            Some(views) => {
                debug!(%id, post_index, views, "post view counted");
                self.events.send(StoreEvent::PostViewed {
                    id: id.clone(),
                    post_index,
                    views,
                    at: Utc::now(),
                });
            }
            None => debug!(%id, post_index, "view ignored, no such post"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{FetchError, FetchResult, NullEventSink};
    use crate::domain::Post;
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    /// Source that returns a canned outcome with no latency
    struct CannedSource {
        outcome: FetchResult,
    }

    #[async_trait]
    impl crate::application::ports::AccountSource for CannedSource {
        async fn fetch(&self) -> FetchResult {
            self.outcome.clone()
        }
    }

    fn store_with(outcome: FetchResult) -> AccountStore<CannedSource, NullEventSink> {
        AccountStore::new(
            Arc::new(CannedSource { outcome }),
            Arc::new(NullEventSink),
        )
    }

    fn account(id: &str, name: &str) -> SocialAccount {
        SocialAccount::new(AccountId::from(id), name, 1000, dec!(5))
    }

    fn account_with_post(id: &str) -> SocialAccount {
        account(id, "Twitter").with_posts(vec![Post::new(
            "p",
            "d",
            "2024-01-01".parse().unwrap(),
        )])
    }

    #[test]
    fn test_initial_state_is_loading() {
        let store = store_with(Ok(Vec::new()));
        let state = store.snapshot();
        assert!(state.loading);
        assert!(state.error.is_none());
        assert!(state.accounts.is_empty());
    }

    #[tokio::test]
    async fn test_successful_load_replaces_list() {
        let store = store_with(Ok(vec![account("1", "Twitter")]));
        store.add_account(account("9", "Leftover"));

        store.load().await;

        let state = store.snapshot();
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.accounts.len(), 1);
        assert_eq!(state.accounts[0].id, AccountId::from("1"));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_list() {
        let store = store_with(Err(FetchError::Network));
        store.add_account(account("1", "Twitter"));

        store.load().await;

        let state = store.snapshot();
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("Network error"));
        assert_eq!(state.accounts.len(), 1);
    }

    #[test]
    fn test_add_is_not_idempotent() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account("1", "Twitter"));
        store.add_account(account("1", "Twitter"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_update_replaces_only_match() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account("1", "Twitter"));
        store.add_account(account("2", "Instagram"));

        let mut edited = account("1", "X");
        edited.followers = 99;
        store.update_account(edited);

        let state = store.snapshot();
        assert_eq!(state.accounts.len(), 2);
        assert_eq!(state.accounts[0].name, "X");
        assert_eq!(state.accounts[0].followers, 99);
        assert_eq!(state.accounts[1].name, "Instagram");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account("1", "Twitter"));

        store.update_account(account("404", "Ghost"));

        let state = store.snapshot();
        assert_eq!(state.accounts.len(), 1);
        assert_eq!(state.accounts[0].name, "Twitter");
    }

    #[test]
    fn test_update_is_idempotent() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account("1", "Twitter"));

        let edited = account("1", "X");
        store.update_account(edited.clone());
        let once = store.snapshot();
        store.update_account(edited);
        assert_eq!(store.snapshot(), once);
    }

    #[test]
    fn test_delete_removes_all_matches() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account("1", "Twitter"));
        store.add_account(account("1", "Twitter again"));
        store.add_account(account("2", "Instagram"));

        store.delete_account(&AccountId::from("1"));

        let state = store.snapshot();
        assert_eq!(state.accounts.len(), 1);
        assert_eq!(state.accounts[0].id, AccountId::from("2"));

        // Deleting again changes nothing
        store.delete_account(&AccountId::from("1"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_increment_touches_exactly_one_post() {
        let store = store_with(Ok(Vec::new()));
        let mut account = account_with_post("1");
        account.posts.push(Post::new("q", "d", "2024-01-02".parse().unwrap()).with_views(10));
        store.add_account(account);
        store.add_account(account_with_post("2"));

        store.increment_post_views(&AccountId::from("1"), 0);

        let state = store.snapshot();
        assert_eq!(state.accounts[0].posts[0].views, 1);
        assert_eq!(state.accounts[0].posts[1].views, 10);
        assert_eq!(state.accounts[1].posts[0].views, 0);
    }

    #[test]
    fn test_increment_invalid_targets_are_noops() {
        let store = store_with(Ok(Vec::new()));
        store.add_account(account_with_post("1"));
        let before = store.snapshot();

        store.increment_post_views(&AccountId::from("1"), 5);
        store.increment_post_views(&AccountId::from("404"), 0);

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_contains_and_lookup() {
        let store = store_with(Ok(Vec::new()));
        assert!(store.is_empty());
        store.add_account(account("1", "Twitter"));

        assert!(store.contains(&AccountId::from("1")));
        assert!(!store.contains(&AccountId::from("2")));
        assert_eq!(
            store.account(&AccountId::from("1")).map(|a| a.name),
            Some("Twitter".to_string())
        );
        assert!(store.account(&AccountId::from("2")).is_none());
    }
}
