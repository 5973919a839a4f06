use dashmap::DashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;
use uuid::Uuid;

use crate::application::ports::{AccountSource, EventSink};
use crate::application::store::AccountStore;
use crate::domain::AccountId;

/// Fraction of a post that must be visible before its view counts
pub const VIEW_THRESHOLD: f64 = 0.5;

/// Identifier for one rendered instance of a post
pub type MountId = Uuid;

struct Mounted {
    account_id: AccountId,
    post_index: usize,
    counted: AtomicBool,
}

/// Turns viewport visibility signals into view counts
///
/// The view layer registers each rendered post instance with
/// [`mount`](ViewTracker::mount) and forwards visibility fractions to
/// [`observe`](ViewTracker::observe). The first observation at or
/// above [`VIEW_THRESHOLD`] latches the mount and dispatches exactly
/// one increment; the exactly-once guarantee lives here, per instance,
/// not in the store. Re-mounting the same post counts again.
pub struct ViewTracker<S, E> {
    store: Arc<AccountStore<S, E>>,
    mounts: DashMap<MountId, Mounted>,
}

impl<S, E> ViewTracker<S, E>
where
    S: AccountSource,
    E: EventSink,
{
    pub fn new(store: Arc<AccountStore<S, E>>) -> Self {
        ViewTracker {
            store,
            mounts: DashMap::new(),
        }
    }

    /// Register a rendered post instance
    pub fn mount(&self, account_id: AccountId, post_index: usize) -> MountId {
        let id = Uuid::new_v4();
        self.mounts.insert(
            id,
            Mounted {
                account_id,
                post_index,
                counted: AtomicBool::new(false),
            },
        );
        id
    }

    /// Forget a rendered post instance
    pub fn unmount(&self, mount: MountId) {
        self.mounts.remove(&mount);
    }

    /// Report how much of a mounted post is currently visible
    ///
    /// Signals for unknown mounts are ignored; they race with
    /// unmounting just like view counts race with deletion.
    pub fn observe(&self, mount: MountId, visible_fraction: f64) {
        if visible_fraction < VIEW_THRESHOLD {
            return;
        }

        let Some(entry) = self.mounts.get(&mount) else {
            debug!(%mount, "visibility signal for unknown mount");
            return;
        };

        // swap latches the mount; only the first observer gets false
        if entry.counted.swap(true, Ordering::SeqCst) {
            return;
        }

        self.store
            .increment_post_views(&entry.account_id, entry.post_index);
    }

    /// Number of currently registered instances
    pub fn mounted(&self) -> usize {
        self.mounts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::NullEventSink;
    use crate::domain::{Post, SocialAccount};
    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    struct EmptySource;

    #[async_trait]
    impl AccountSource for EmptySource {
        async fn fetch(&self) -> crate::application::ports::FetchResult {
            Ok(Vec::new())
        }
    }

    fn tracker() -> ViewTracker<EmptySource, NullEventSink> {
        let store = Arc::new(AccountStore::new(
            Arc::new(EmptySource),
            Arc::new(NullEventSink),
        ));
        store.add_account(
            SocialAccount::new(AccountId::from("1"), "Twitter", 1000, dec!(5)).with_posts(vec![
                Post::new("p", "d", "2024-01-01".parse().unwrap()),
            ]),
        );
        ViewTracker::new(store)
    }

    fn views(tracker: &ViewTracker<EmptySource, NullEventSink>) -> u64 {
        tracker.store.snapshot().accounts[0].posts[0].views
    }

    #[test]
    fn test_counts_once_per_mount() {
        let tracker = tracker();
        let mount = tracker.mount(AccountId::from("1"), 0);

        tracker.observe(mount, 0.6);
        tracker.observe(mount, 1.0);
        tracker.observe(mount, 0.8);

        assert_eq!(views(&tracker), 1);
    }

    #[test]
    fn test_each_mount_counts_separately() {
        let tracker = tracker();
        let first = tracker.mount(AccountId::from("1"), 0);
        let second = tracker.mount(AccountId::from("1"), 0);

        tracker.observe(first, 1.0);
        tracker.observe(second, 1.0);

        assert_eq!(views(&tracker), 2);
    }

    #[test]
    fn test_below_threshold_does_not_count() {
        let tracker = tracker();
        let mount = tracker.mount(AccountId::from("1"), 0);

        tracker.observe(mount, 0.49);
        assert_eq!(views(&tracker), 0);

        tracker.observe(mount, 0.5);
        assert_eq!(views(&tracker), 1);
    }

    #[test]
    fn test_unknown_and_unmounted_are_ignored() {
        let tracker = tracker();
        tracker.observe(Uuid::new_v4(), 1.0);

        let mount = tracker.mount(AccountId::from("1"), 0);
        tracker.unmount(mount);
        assert_eq!(tracker.mounted(), 0);
        tracker.observe(mount, 1.0);

        assert_eq!(views(&tracker), 0);
    }

    #[test]
    fn test_mount_for_deleted_account_is_noop() {
        let tracker = tracker();
        let mount = tracker.mount(AccountId::from("1"), 0);
        tracker.store.delete_account(&AccountId::from("1"));

        // The signal arrives after deletion; nothing happens
        tracker.observe(mount, 1.0);
        assert!(tracker.store.snapshot().accounts.is_empty());
    }
}
