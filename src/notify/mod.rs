//! Configuration change notification.
//!
//! Polling watchers detect content changes and deliver them over a
//! [`ConfigStream`], consumed directly or through a callback [`Subscription`].

mod stream;
mod subscriber;
mod watcher;

pub use stream::{ConfigStream, WatchEvent, WatcherState};
pub use subscriber::Subscription;
pub(crate) use watcher::{Fingerprint, PollingWatcher};
