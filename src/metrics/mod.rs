//! Built-in metrics for polling watchers.
//!
//! Provides OpenTelemetry metrics tracking:
//! - Polls and poll duration
//! - Emitted changes and rejected content
//! - Read failures
//! - Running watchers
//! - Time since the last change
//!
//! # Examples
//!
//! ```rust,no_run
//! use reactive_config::prelude::*;
//! use reactive_config::metrics::WatchMetrics;
//! use opentelemetry::global;
//!
//! # fn example() -> Result<()> {
//! let meter = global::meter("my-app");
//!
//! let source = JsonConfigurationSource::new(
//!     NamespaceKeyPathProvider,
//!     JsonConfigurationSourceSettings::new("/etc/my-app", 1.0),
//! )?
//! .with_metrics(WatchMetrics::new(meter));
//! # Ok(())
//! # }
//! ```

mod watch_metrics;

pub use watch_metrics::{PollTimer, WatchMetrics};
