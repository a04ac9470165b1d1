//! Snapshot plus stream returned by a configuration source.

use crate::core::LiveConfig;
use crate::error::Result;
use crate::notify::ConfigStream;

/// The current configuration value and a stream of its future values.
///
/// Passed into [`ConfigurationSource::get`] as the fallback when no file
/// exists, and returned from it with a live stream attached. The value is
/// never mutated; only the stream yields new values.
///
/// [`ConfigurationSource::get`]: crate::sources::ConfigurationSource::get
///
/// # Examples
///
/// ```rust
/// use reactive_config::prelude::*;
/// # use serde::{Deserialize, Serialize};
/// # #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// # struct AppConfig { port: u16 }
/// # impl Configured for AppConfig {}
///
/// let fallback = ConfigurationResult::new(AppConfig { port: 8080 });
/// assert_eq!(fallback.result().port, 8080);
///
/// let defaulted = ConfigurationResult::<AppConfig>::create();
/// assert_eq!(defaulted.result().port, 0);
/// ```
#[derive(Debug)]
pub struct ConfigurationResult<T> {
    result: T,
    stream: ConfigStream<T>,
}

impl<T: Default> ConfigurationResult<T> {
    /// A result holding `T::default()` and an empty stream.
    pub fn create() -> Self {
        Self::new(T::default())
    }
}

impl<T> ConfigurationResult<T> {
    /// A result holding `value` and an empty stream.
    pub fn new(value: T) -> Self {
        Self::from_parts(value, ConfigStream::empty())
    }

    /// Pair a value with a stream.
    pub fn from_parts(value: T, stream: ConfigStream<T>) -> Self {
        Self {
            result: value,
            stream,
        }
    }

    /// The value at the time the result was created.
    pub fn result(&self) -> &T {
        &self.result
    }

    /// The stream of later values.
    pub fn stream_mut(&mut self) -> &mut ConfigStream<T> {
        &mut self.stream
    }

    /// Take the value, dropping (and so stopping) the stream.
    pub fn into_result(self) -> T {
        self.result
    }

    /// Take the stream, dropping the value.
    pub fn into_stream(self) -> ConfigStream<T> {
        self.stream
    }

    /// Split into value and stream.
    pub fn into_parts(self) -> (T, ConfigStream<T>) {
        (self.result, self.stream)
    }

    /// Bind into a [`LiveConfig`] that always holds the latest value.
    ///
    /// # Errors
    ///
    /// Returns an error when called outside a tokio runtime.
    pub fn into_live(self) -> Result<LiveConfig<T>>
    where
        T: Send + Sync + 'static,
    {
        LiveConfig::bind(self.result, self.stream)
    }
}

impl<T: Default> Default for ConfigurationResult<T> {
    fn default() -> Self {
        Self::create()
    }
}
