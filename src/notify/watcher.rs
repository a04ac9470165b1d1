//! Polling watcher that turns file content changes into stream events.

use super::stream::{ConfigStream, WatchEvent, WatchGuard, WatchState, WatcherState};
use crate::core::Configured;
use crate::error::{ConfigError, Result};
use crate::files::{ConfigurationFileStore, codec};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

#[cfg(feature = "metrics")]
use crate::metrics::WatchMetrics;

/// Events buffered between a watcher and its stream.
const EVENT_BUFFER: usize = 16;

/// What a watcher last saw at its path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Fingerprint {
    Missing,
    Content(Vec<u8>),
}

/// Background poller for one configuration file.
///
/// Each tick reads the file on the blocking pool and compares the full
/// content with the previous tick. Ticks never overlap: the next sleep starts
/// only after the previous read and decode have finished.
pub(crate) struct PollingWatcher<T> {
    path: PathBuf,
    interval: Duration,
    store: ConfigurationFileStore,
    fingerprint: Fingerprint,
    /// Last successfully decoded value, `None` if the file never held one.
    last: Option<T>,
    state: Arc<WatchState>,
    #[cfg(feature = "metrics")]
    metrics: Option<WatchMetrics>,
}

impl<T: Configured> PollingWatcher<T> {
    /// Create a watcher primed with what was observed when the caller loaded
    /// the file, so that content is never reported as a change.
    pub(crate) fn new(
        path: PathBuf,
        interval: Duration,
        store: ConfigurationFileStore,
        fingerprint: Fingerprint,
        last: Option<T>,
    ) -> Self {
        Self {
            path,
            interval,
            store,
            fingerprint,
            last,
            state: Arc::new(WatchState::new(WatcherState::Idle)),
            #[cfg(feature = "metrics")]
            metrics: None,
        }
    }

    #[cfg(feature = "metrics")]
    pub(crate) fn with_metrics(mut self, metrics: Option<WatchMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Start polling on the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::WatchError`] when called outside a runtime.
    pub(crate) fn spawn(self) -> Result<ConfigStream<T>> {
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| {
            ConfigError::WatchError(format!("polling requires a tokio runtime: {}", e))
        })?;

        let (events_tx, events_rx) = mpsc::channel(EVENT_BUFFER);
        let (stop_tx, stop_rx) = oneshot::channel();
        let state = Arc::clone(&self.state);
        state.set(WatcherState::Watching);

        let task = runtime.spawn(self.run(events_tx, stop_rx));
        Ok(ConfigStream::watching(
            events_rx,
            WatchGuard::new(stop_tx, state, task),
        ))
    }

    async fn run(
        mut self,
        events: mpsc::Sender<WatchEvent<T>>,
        mut stop: oneshot::Receiver<()>,
    ) {
        tracing::debug!(
            path = %self.path.display(),
            interval_ms = self.interval.as_millis() as u64,
            "watcher started"
        );
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.watcher_started();
        }

        loop {
            tokio::select! {
                biased;
                _ = &mut stop => break,
                _ = events.closed() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }

            let event = self.tick().await;

            // A stop issued while the tick was reading wins over its result.
            if self.state.get() == WatcherState::Stopped {
                break;
            }
            let Some(event) = event else {
                continue;
            };

            tokio::select! {
                biased;
                _ = &mut stop => break,
                sent = events.send(event) => {
                    if sent.is_err() {
                        break;
                    }
                }
            }
        }

        self.state.set(WatcherState::Stopped);
        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            metrics.watcher_stopped();
        }
        tracing::debug!(path = %self.path.display(), "watcher stopped");
    }

    async fn tick(&mut self) -> Option<WatchEvent<T>> {
        #[cfg(feature = "metrics")]
        let timer = self.metrics.as_ref().map(|m| m.start_poll());

        let store = self.store;
        let path = self.path.clone();
        let read = tokio::task::spawn_blocking(move || store.read_if_present(&path)).await;

        let observed = match read {
            Ok(Ok(Some(raw))) => Some(Fingerprint::Content(raw)),
            Ok(Ok(None)) => Some(Fingerprint::Missing),
            Ok(Err(e)) => {
                tracing::warn!(path = %self.path.display(), error = %e, "transient read failure");
                None
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "read task failed");
                None
            }
        };

        #[cfg(feature = "metrics")]
        if let (Some(metrics), Some(timer)) = (&self.metrics, timer) {
            metrics.record_poll(timer);
            if observed.is_none() {
                metrics.record_read_failure();
            }
        }

        let event = self.observe(observed?);

        #[cfg(feature = "metrics")]
        if let Some(metrics) = &self.metrics {
            match &event {
                Some(WatchEvent::Changed(_)) => metrics.record_change(),
                Some(WatchEvent::Rejected(_)) => metrics.record_rejected(),
                None => {}
            }
        }

        event
    }

    /// Compare a fresh observation with the previous one.
    fn observe(&mut self, observed: Fingerprint) -> Option<WatchEvent<T>> {
        if observed == self.fingerprint {
            tracing::trace!(path = %self.path.display(), "unchanged");
            return None;
        }

        let decoded = match &observed {
            Fingerprint::Missing => {
                tracing::debug!(path = %self.path.display(), "configuration file removed");
                self.fingerprint = observed;
                return None;
            }
            Fingerprint::Content(raw) => codec::decode::<T>(raw, &self.path),
        };
        // Bad content is remembered too, so it is reported once rather than every tick.
        self.fingerprint = observed;

        match decoded {
            Ok(value) if self.last.as_ref() == Some(&value) => {
                tracing::debug!(path = %self.path.display(), "rewritten with an equal value");
                None
            }
            Ok(value) => {
                tracing::info!(path = %self.path.display(), "configuration changed");
                self.last = Some(value.clone());
                Some(WatchEvent::Changed(value))
            }
            Err(err) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %err,
                    "rejected configuration content"
                );
                Some(WatchEvent::Rejected(err))
            }
        }
    }
}
