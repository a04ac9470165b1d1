//! Callback subscriptions on a configuration stream.

use tokio::task::JoinHandle;

/// Handle for a callback registered with [`ConfigStream::subscribe`].
///
/// When the handle is dropped the callback task is cancelled, which drops the
/// stream and stops its watcher.
///
/// [`ConfigStream::subscribe`]: super::ConfigStream::subscribe
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
///
/// let subscription = result.into_stream().subscribe(|cfg| {
///     println!("Port changed to {}", cfg.port);
/// })?;
///
/// // Later, unsubscribe
/// drop(subscription);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Subscription {
    task: JoinHandle<()>,
}

impl Subscription {
    pub(crate) fn new(task: JoinHandle<()>) -> Self {
        Self { task }
    }

    /// Whether the callback can still be invoked.
    ///
    /// Becomes `false` once the stream has ended.
    pub fn is_active(&self) -> bool {
        !self.task.is_finished()
    }

    /// Cancel the subscription. Equivalent to dropping it.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::super::ConfigStream;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test]
    async fn test_subscription_on_empty_stream_finishes() {
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = Arc::clone(&counter);

        let subscription = ConfigStream::<u32>::empty()
            .subscribe(move |_| {
                counter_clone.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!subscription.is_active());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_subscribe_outside_runtime_fails() {
        let result = ConfigStream::<u32>::empty().subscribe(|_| {});
        assert!(result.is_err());
    }
}
