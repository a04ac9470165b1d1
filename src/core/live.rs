//! Lock-free view of the latest configuration value.

use crate::error::Result;
use crate::notify::{ConfigStream, Subscription};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Always-current configuration value.
///
/// Built from a [`ConfigurationResult`](crate::core::ConfigurationResult):
/// seeded with its snapshot, then updated in the background from its stream.
/// Reads never block and never observe a partially applied update.
///
/// Clones share the same value. The watcher stops when the last clone is
/// dropped.
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
/// let config = source
///     .get(ConfigurationResult::<AppConfig>::create())?
///     .into_live()?;
///
/// // Zero-cost read
/// let cfg = config.get();
/// println!("Port: {}", cfg.port);
/// # Ok(())
/// # }
/// ```
pub struct LiveConfig<T> {
    current: Arc<ArcSwap<T>>,
    subscription: Option<Arc<Subscription>>,
}

impl<T: Send + Sync + 'static> LiveConfig<T> {
    /// A value that never changes.
    pub fn fixed(value: T) -> Self {
        Self {
            current: Arc::new(ArcSwap::from_pointee(value)),
            subscription: None,
        }
    }

    pub(crate) fn bind(initial: T, stream: ConfigStream<T>) -> Result<Self> {
        let current = Arc::new(ArcSwap::from_pointee(initial));
        let target = Arc::clone(&current);
        let subscription = stream.subscribe(move |value| {
            target.store(Arc::new(value));
        })?;

        Ok(Self {
            current,
            subscription: Some(Arc::new(subscription)),
        })
    }
}

impl<T> LiveConfig<T> {
    /// Get a reference-counted handle to the current value.
    pub fn get(&self) -> Arc<T> {
        self.current.load_full()
    }

    /// Whether updates are still being applied.
    pub fn is_watching(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(|subscription| subscription.is_active())
    }
}

impl<T> Clone for LiveConfig<T> {
    fn clone(&self) -> Self {
        Self {
            current: Arc::clone(&self.current),
            subscription: self.subscription.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct TestConfig {
        value: i32,
    }

    #[test]
    fn test_fixed_and_clone() {
        let config = LiveConfig::fixed(TestConfig { value: 42 });
        let config2 = config.clone();

        assert_eq!(config.get().value, 42);
        assert_eq!(config2.get().value, 42);
        assert!(!config.is_watching());
    }

    #[tokio::test]
    async fn test_bind_to_finished_stream_keeps_initial() {
        let config = LiveConfig::bind(TestConfig { value: 1 }, ConfigStream::empty()).unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        assert_eq!(config.get().value, 1);
        assert!(!config.is_watching());
    }
}
