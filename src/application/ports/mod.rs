mod account_source;
mod event_sink;

pub use account_source::{AccountSource, FetchError, FetchResult};
pub use event_sink::{EventSink, NullEventSink};
