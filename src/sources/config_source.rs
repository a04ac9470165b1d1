//! Configuration source trait.

use crate::core::{Configured, ConfigurationResult};
use crate::error::Result;

/// Trait for configuration sources.
///
/// A source decides whether it can supply a configuration type and, if asked,
/// produces its current value together with a stream of future values.
pub trait ConfigurationSource: Send + Sync {
    /// Whether this source currently holds configuration for `T`.
    ///
    /// Never fails: anything that prevents the source from supplying `T`
    /// reports `false`.
    fn handles<T: Configured>(&self) -> bool;

    /// Resolve `T`, falling back to `initial`'s value when the source holds
    /// nothing for it.
    ///
    /// # Errors
    ///
    /// Returns an error if stored configuration exists but cannot be read or
    /// decoded, or if watching cannot be started.
    fn get<T: Configured>(&self, initial: ConfigurationResult<T>) -> Result<ConfigurationResult<T>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}
