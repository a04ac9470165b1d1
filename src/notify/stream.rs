//! The receiving end of a polling watcher.

use super::subscriber::Subscription;
use crate::error::{ConfigError, Result};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

/// Lifecycle of the watcher behind a [`ConfigStream`].
///
/// `Stopped` is terminal: a watcher never resumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    /// No watcher has been started (e.g. [`ConfigStream::empty`]).
    Idle,
    /// The watcher is polling.
    Watching,
    /// The watcher was stopped.
    Stopped,
}

/// Watcher state shared between the stream and the polling task.
pub(crate) struct WatchState(AtomicU8);

impl WatchState {
    pub(crate) fn new(state: WatcherState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    pub(crate) fn get(&self) -> WatcherState {
        match self.0.load(Ordering::Acquire) {
            0 => WatcherState::Idle,
            1 => WatcherState::Watching,
            _ => WatcherState::Stopped,
        }
    }

    pub(crate) fn set(&self, state: WatcherState) {
        self.0.store(state as u8, Ordering::Release);
    }
}

/// An item produced by a watcher.
#[derive(Debug)]
pub enum WatchEvent<T> {
    /// The file now holds a different value.
    Changed(T),
    /// The file changed but its content could not be decoded. The previous
    /// value stays current and watching continues.
    Rejected(ConfigError),
}

impl<T> WatchEvent<T> {
    /// The new value, if this event carries one.
    pub fn into_changed(self) -> Option<T> {
        match self {
            Self::Changed(value) => Some(value),
            Self::Rejected(_) => None,
        }
    }
}

/// Owns the polling task; stops it when dropped.
pub(crate) struct WatchGuard {
    stop: Option<oneshot::Sender<()>>,
    state: Arc<WatchState>,
    task: Option<JoinHandle<()>>,
}

impl WatchGuard {
    pub(crate) fn new(
        stop: oneshot::Sender<()>,
        state: Arc<WatchState>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            stop: Some(stop),
            state,
            task: Some(task),
        }
    }

    fn stop(&mut self) {
        self.state.set(WatcherState::Stopped);
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
    }
}

impl Drop for WatchGuard {
    fn drop(&mut self) {
        self.stop();
    }
}

/// A live sequence of configuration values.
///
/// Each stream owns exactly one watcher. Dropping the stream, calling
/// [`stop`](Self::stop), or dropping the [`Subscription`] returned by
/// [`subscribe`](Self::subscribe) stops it within one polling interval.
///
/// Consecutive values are never equal.
///
/// # Examples
///
/// ```rust,no_run
/// use reactive_config::prelude::*;
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// # struct AppConfig { port: u16 }
/// # impl Configured for AppConfig {}
///
/// # async fn example(source: JsonConfigurationSource) -> Result<()> {
/// let result = source.get(ConfigurationResult::<AppConfig>::create())?;
/// let (current, mut stream) = result.into_parts();
/// println!("Starting on port {}", current.port);
///
/// while let Some(updated) = stream.next().await {
///     println!("Port is now {}", updated.port);
/// }
/// # Ok(())
/// # }
/// ```
pub struct ConfigStream<T> {
    events: mpsc::Receiver<WatchEvent<T>>,
    guard: Option<WatchGuard>,
    stopped: bool,
}

impl<T> ConfigStream<T> {
    /// A stream with no watcher; it ends immediately.
    pub fn empty() -> Self {
        let (_, events) = mpsc::channel(1);
        Self {
            events,
            guard: None,
            stopped: false,
        }
    }

    pub(crate) fn watching(events: mpsc::Receiver<WatchEvent<T>>, guard: WatchGuard) -> Self {
        Self {
            events,
            guard: Some(guard),
            stopped: false,
        }
    }

    /// Wait for the next changed value.
    ///
    /// Rejected content is skipped. Returns `None` once the stream is stopped.
    pub async fn next(&mut self) -> Option<T> {
        loop {
            match self.next_event().await? {
                WatchEvent::Changed(value) => return Some(value),
                WatchEvent::Rejected(_) => continue,
            }
        }
    }

    /// Wait for the next event, including rejected content.
    pub async fn next_event(&mut self) -> Option<WatchEvent<T>> {
        if self.stopped {
            return None;
        }
        self.events.recv().await
    }

    /// Wait up to `timeout` for the next changed value.
    pub async fn next_timeout(&mut self, timeout: Duration) -> Option<T> {
        tokio::time::timeout(timeout, self.next())
            .await
            .ok()
            .flatten()
    }

    /// Current watcher state.
    pub fn state(&self) -> WatcherState {
        match &self.guard {
            Some(guard) => guard.state.get(),
            None if self.stopped => WatcherState::Stopped,
            None => WatcherState::Idle,
        }
    }

    /// Whether a watcher is still polling for this stream.
    pub fn is_watching(&self) -> bool {
        self.state() == WatcherState::Watching
    }

    /// Stop the watcher. No value is returned after this call, even one that
    /// was already buffered.
    pub fn stop(&mut self) {
        self.stopped = true;
        if let Some(guard) = &mut self.guard {
            guard.stop();
        }
        self.events.close();
    }

    /// Stop the watcher and wait for its task to exit.
    pub async fn shutdown(mut self) {
        self.stop();
        if let Some(task) = self.guard.as_mut().and_then(|guard| guard.task.take()) {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "watcher task ended abnormally");
            }
        }
    }

    /// Invoke `on_change` for every changed value on a background task.
    ///
    /// The returned [`Subscription`] owns the stream; dropping it stops the
    /// watcher.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WatchError`] when called outside a tokio runtime.
    pub fn subscribe<F>(mut self, mut on_change: F) -> Result<Subscription>
    where
        T: Send + 'static,
        F: FnMut(T) + Send + 'static,
    {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            ConfigError::WatchError(format!("subscribing requires a tokio runtime: {}", e))
        })?;

        let task = runtime.spawn(async move {
            while let Some(value) = self.next().await {
                on_change(value);
            }
        });
        Ok(Subscription::new(task))
    }
}

impl<T> std::fmt::Debug for ConfigStream<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStream")
            .field("state", &self.state())
            .finish()
    }
}
