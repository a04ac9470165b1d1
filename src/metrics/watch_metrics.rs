//! Watcher metrics tracking using OpenTelemetry.

use opentelemetry::metrics::{Counter, Gauge, Histogram, Meter, UpDownCounter};
use std::sync::Arc;
use std::time::Instant;

/// Metrics collector for polling watchers.
///
/// Tracks polls, emitted changes, rejected content, read failures, poll
/// latency and the number of running watchers.
///
/// # Examples
///
/// ```rust,no_run
/// use reactive_config::metrics::WatchMetrics;
/// use opentelemetry::global;
///
/// let meter = global::meter("reactive-config");
/// let metrics = WatchMetrics::new(meter);
///
/// let timer = metrics.start_poll();
/// // ... read the file ...
/// metrics.record_poll(timer);
/// ```
#[derive(Clone)]
pub struct WatchMetrics {
    polls: Counter<u64>,
    changes: Counter<u64>,
    rejected: Counter<u64>,
    read_failures: Counter<u64>,
    poll_duration: Histogram<f64>,
    active_watchers: UpDownCounter<i64>,
    config_age_seconds: Gauge<i64>,
    last_change: Arc<parking_lot::Mutex<Instant>>,
}

/// Timer returned by [`WatchMetrics::start_poll`].
pub struct PollTimer {
    start: Instant,
}

impl WatchMetrics {
    /// Create a new metrics collector with the provided meter.
    pub fn new(meter: Meter) -> Self {
        let polls = meter
            .u64_counter("reactive_config.watch.polls")
            .with_description("Number of file polls performed by watchers")
            .build();

        let changes = meter
            .u64_counter("reactive_config.watch.changes")
            .with_description("Number of changed values emitted")
            .build();

        let rejected = meter
            .u64_counter("reactive_config.watch.rejected")
            .with_description("Number of changed files whose content could not be decoded")
            .build();

        let read_failures = meter
            .u64_counter("reactive_config.watch.read_failures")
            .with_description("Number of polls that failed to read the file")
            .build();

        let poll_duration = meter
            .f64_histogram("reactive_config.watch.poll.duration")
            .with_description("Duration of a single poll in seconds")
            .with_unit("s")
            .build();

        let active_watchers = meter
            .i64_up_down_counter("reactive_config.watch.active")
            .with_description("Number of running watchers")
            .build();

        let config_age_seconds = meter
            .i64_gauge("reactive_config.age")
            .with_description("Time since the last emitted change in seconds")
            .with_unit("s")
            .build();

        Self {
            polls,
            changes,
            rejected,
            read_failures,
            poll_duration,
            active_watchers,
            config_age_seconds,
            last_change: Arc::new(parking_lot::Mutex::new(Instant::now())),
        }
    }

    /// Start timing a poll.
    pub fn start_poll(&self) -> PollTimer {
        PollTimer {
            start: Instant::now(),
        }
    }

    /// Record a completed poll.
    pub fn record_poll(&self, timer: PollTimer) {
        self.polls.add(1, &[]);
        self.poll_duration
            .record(timer.start.elapsed().as_secs_f64(), &[]);
    }

    /// Record an emitted change.
    pub fn record_change(&self) {
        self.changes.add(1, &[]);
        *self.last_change.lock() = Instant::now();
        self.config_age_seconds.record(0, &[]);
    }

    /// Record content that changed but could not be decoded.
    pub fn record_rejected(&self) {
        self.rejected.add(1, &[]);
    }

    /// Record a poll whose read failed.
    pub fn record_read_failure(&self) {
        self.read_failures.add(1, &[]);
    }

    /// Record a watcher starting.
    pub fn watcher_started(&self) {
        self.active_watchers.add(1, &[]);
    }

    /// Record a watcher stopping.
    pub fn watcher_stopped(&self) {
        self.active_watchers.add(-1, &[]);
    }

    /// Update the time-since-last-change gauge.
    ///
    /// This should be called periodically to track how stale the configuration is.
    pub fn update_config_age(&self) {
        let age_secs = self.last_change.lock().elapsed().as_secs() as i64;
        self.config_age_seconds.record(age_secs, &[]);
    }
}
