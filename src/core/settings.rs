//! Settings shared by every resolution of a JSON configuration source.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Settings for [`JsonConfigurationSource`](crate::sources::JsonConfigurationSource).
///
/// Created once at startup and never mutated afterwards.
///
/// # Examples
///
/// ```rust
/// use reactive_config::core::JsonConfigurationSourceSettings;
/// use std::time::Duration;
///
/// let settings = JsonConfigurationSourceSettings::new("/etc/my-app", 0.5);
/// assert_eq!(settings.polling_interval().unwrap(), Duration::from_millis(500));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonConfigurationSourceSettings {
    /// Directory holding one JSON document per configuration type.
    pub configuration_file_path: PathBuf,
    /// Time between polls of a watched file.
    pub polling_interval_in_seconds: f64,
}

impl JsonConfigurationSourceSettings {
    /// Create settings for a root directory and a poll interval in seconds.
    pub fn new(
        configuration_file_path: impl Into<PathBuf>,
        polling_interval_in_seconds: f64,
    ) -> Self {
        Self {
            configuration_file_path: configuration_file_path.into(),
            polling_interval_in_seconds,
        }
    }

    /// Load settings from a file (YAML, TOML or JSON, detected from the extension).
    ///
    /// Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting settings are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings: Self = config::Config::builder()
            .add_source(config::File::from(path).required(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                ConfigError::LoadError(format!("Failed to load {}: {}", path.display(), e))
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from environment variables with the given prefix.
    ///
    /// `APP_CONFIGURATION_FILE_PATH` and `APP_POLLING_INTERVAL_IN_SECONDS` map
    /// to the two fields for prefix `APP`. Unset variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or the resulting
    /// settings are invalid.
    pub fn from_env(prefix: &str) -> Result<Self> {
        Self::from_environment(config::Environment::with_prefix(prefix), prefix)
    }

    fn from_environment(environment: config::Environment, prefix: &str) -> Result<Self> {
        let settings: Self = config::Config::builder()
            .add_source(environment.try_parsing(true))
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| {
                ConfigError::LoadError(format!("Failed to load settings from {}_*: {}", prefix, e))
            })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that the poll interval is a positive, finite number of seconds.
    pub fn validate(&self) -> Result<()> {
        self.polling_interval().map(|_| ())
    }

    /// The poll interval as a [`Duration`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] for zero, negative, NaN or
    /// out-of-range values.
    pub fn polling_interval(&self) -> Result<Duration> {
        let secs = self.polling_interval_in_seconds;
        if !(secs.is_finite() && secs > 0.0) {
            return Err(ConfigError::InvalidSettings(format!(
                "polling_interval_in_seconds must be a positive number, got {}",
                secs
            )));
        }
        Duration::try_from_secs_f64(secs).map_err(|e| {
            ConfigError::InvalidSettings(format!("polling_interval_in_seconds {}: {}", secs, e))
        })
    }
}

impl Default for JsonConfigurationSourceSettings {
    fn default() -> Self {
        Self {
            configuration_file_path: PathBuf::from("config"),
            polling_interval_in_seconds: 1.0,
        }
    }
}
