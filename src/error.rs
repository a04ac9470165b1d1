//! Error types for reactive-config.

use std::path::PathBuf;

/// Result type alias for reactive-config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when working with configuration.
///
/// A missing configuration file is not an error for [`handles`] or [`get`]:
/// the former reports `false` and the latter falls back to the caller's
/// initial value. [`ConfigError::NotFound`] is only returned by direct store
/// reads.
///
/// [`handles`]: crate::sources::ConfigurationSource::handles
/// [`get`]: crate::sources::ConfigurationSource::get
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Failed to deserialize configuration.
    #[error("Failed to deserialize configuration: {0}")]
    DeserializationError(String),

    /// Failed to serialize configuration.
    #[error("Failed to serialize configuration: {0}")]
    SerializationError(String),

    /// The source settings are not usable.
    #[error("Invalid source settings: {0}")]
    InvalidSettings(String),

    /// The source settings could not be loaded.
    #[error("Failed to load settings: {0}")]
    LoadError(String),

    /// The polling watcher could not be started.
    #[error("File watching error: {0}")]
    WatchError(String),

    /// IO error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Generic error for other cases.
    #[error("Configuration error: {0}")]
    Other(String),
}

impl ConfigError {
    /// Whether this error means the configuration is simply absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
