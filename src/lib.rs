//! # reactive-config
//!
//! Typed, hot-reloading JSON configuration with polling change detection.
//!
//! ## Overview
//!
//! Each configuration type lives in its own JSON document under a root
//! directory. Asking a [`JsonConfigurationSource`](sources::JsonConfigurationSource)
//! for a type returns:
//! - the current value (or the caller's fallback when no file exists)
//! - a stream that yields a new value whenever the file's content changes
//!
//! Change detection compares full file content between polls, so rewriting a
//! file with identical content never produces an update.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use reactive_config::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
//! #[serde(default)]
//! struct ServerConfig {
//!     port: u16,
//!     host: String,
//! }
//!
//! impl Configured for ServerConfig {}
//!
//! # async fn example() -> reactive_config::error::Result<()> {
//! let settings = JsonConfigurationSourceSettings::new("/etc/my-app", 0.5);
//! let source = JsonConfigurationSource::new(NamespaceKeyPathProvider, settings)?;
//!
//! let (current, mut updates) = source
//!     .get(ConfigurationResult::<ServerConfig>::create())?
//!     .into_parts();
//! println!("Listening on {}:{}", current.host, current.port);
//!
//! while let Some(cfg) = updates.next().await {
//!     println!("Now {}:{}", cfg.host, cfg.port);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags
//!
//! - `metrics`: OpenTelemetry instruments for watchers ([`metrics::WatchMetrics`])

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod files;
pub mod notify;
pub mod sources;

#[cfg(feature = "metrics")]
pub mod metrics;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{
        ConfigurationResult, Configured, JsonConfigurationSourceSettings, KeyPathProvider,
        KeyPathRegistry, LiveConfig, NamespaceKeyPathProvider,
    };
    pub use crate::error::{ConfigError, Result};
    pub use crate::notify::{ConfigStream, Subscription, WatchEvent, WatcherState};
    pub use crate::sources::{ConfigurationSource, JsonConfigurationSource};
}
