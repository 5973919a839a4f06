pub mod ports;
pub mod store;
pub mod visibility;

pub use ports::{AccountSource, EventSink, FetchError, FetchResult, NullEventSink};
pub use store::{AccountStore, StoreState};
pub use visibility::{MountId, VIEW_THRESHOLD, ViewTracker};
