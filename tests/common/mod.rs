//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use reactive_config::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;

/// How long to wait for an expected emission.
pub const CAPTURE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct TestConfigured {
    pub is_enabled: bool,
    pub enabled_on: DateTime<Utc>,
    pub app_key: String,
}

impl Default for TestConfigured {
    fn default() -> Self {
        Self {
            is_enabled: true,
            enabled_on: Utc::now(),
            app_key: "default app key".to_string(),
        }
    }
}

impl Configured for TestConfigured {}

/// Settings rooted at a directory that does not exist yet.
///
/// The returned `TempDir` owns the parent and must outlive the test.
pub fn create_settings() -> (TempDir, JsonConfigurationSourceSettings) {
    static NEXT: AtomicUsize = AtomicUsize::new(0);

    let temp_dir = TempDir::new().unwrap();
    let subdir = format!("f{}", NEXT.fetch_add(1, Ordering::SeqCst));
    let settings = JsonConfigurationSourceSettings::new(temp_dir.path().join(subdir), 0.01);
    (temp_dir, settings)
}

/// A source whose registry maps `TestConfigured` to `namespace`.
pub fn create_source(
    namespace: &str,
) -> (TempDir, JsonConfigurationSource<KeyPathRegistry>) {
    let (temp_dir, settings) = create_settings();
    let registry = KeyPathRegistry::new().register::<TestConfigured>(namespace);
    let source = JsonConfigurationSource::new(registry, settings).unwrap();
    (temp_dir, source)
}

/// Run `action`, then wait for the first value the stream emits.
pub async fn capture_first<T>(stream: &mut ConfigStream<T>, action: impl FnOnce()) -> Option<T> {
    action();
    stream.next_timeout(CAPTURE_TIMEOUT).await
}

/// Wait `seconds` for any value the stream emits.
pub async fn capture<T>(stream: &mut ConfigStream<T>, seconds: f64) -> Option<T> {
    stream.next_timeout(Duration::from_secs_f64(seconds)).await
}

/// Wait until `condition` holds, polling every few milliseconds.
pub async fn eventually(mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + CAPTURE_TIMEOUT;
    while tokio::time::Instant::now() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    condition()
}
