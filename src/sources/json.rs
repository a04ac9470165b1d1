//! Per-type JSON file configuration source.

use super::ConfigurationSource;
use crate::core::{
    Configured, ConfigurationResult, JsonConfigurationSourceSettings, KeyPathProvider,
    NamespaceKeyPathProvider,
};
use crate::error::Result;
use crate::files::{ConfigurationFileStore, PathResolver, codec};
use crate::notify::{Fingerprint, PollingWatcher};
use std::path::PathBuf;
use std::time::Duration;

#[cfg(feature = "metrics")]
use crate::metrics::WatchMetrics;

/// Configuration source backed by one JSON document per type.
///
/// `T` is stored at `<configuration_file_path>/<key path of T>.json`. Every
/// [`get`](ConfigurationSource::get) starts its own polling watcher, so the
/// returned stream reflects later edits to that file.
///
/// # Examples
///
/// ```rust,no_run
/// use reactive_config::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// impl Configured for AppConfig {}
///
/// # async fn example() -> Result<()> {
/// let settings = JsonConfigurationSourceSettings::new("/etc/my-app", 1.0);
/// let source = JsonConfigurationSource::new(NamespaceKeyPathProvider, settings)?;
///
/// if !source.handles::<AppConfig>() {
///     source.create_config_file(&AppConfig { port: 8080 })?;
/// }
///
/// let result = source.get(ConfigurationResult::<AppConfig>::create())?;
/// println!("Port: {}", result.result().port);
/// # Ok(())
/// # }
/// ```
pub struct JsonConfigurationSource<P = NamespaceKeyPathProvider> {
    key_paths: P,
    settings: JsonConfigurationSourceSettings,
    resolver: PathResolver,
    store: ConfigurationFileStore,
    polling_interval: Duration,
    #[cfg(feature = "metrics")]
    metrics: Option<WatchMetrics>,
}

impl<P: KeyPathProvider> JsonConfigurationSource<P> {
    /// Create a source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`](crate::error::ConfigError::InvalidSettings)
    /// if the poll interval is not a positive number of seconds.
    pub fn new(key_paths: P, settings: JsonConfigurationSourceSettings) -> Result<Self> {
        let polling_interval = settings.polling_interval()?;
        Ok(Self {
            key_paths,
            resolver: PathResolver::new(settings.configuration_file_path.clone()),
            settings,
            store: ConfigurationFileStore::new(),
            polling_interval,
            #[cfg(feature = "metrics")]
            metrics: None,
        })
    }

    /// Record watcher activity with the given metrics.
    #[cfg(feature = "metrics")]
    pub fn with_metrics(mut self, metrics: WatchMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// The settings this source was created with.
    pub fn settings(&self) -> &JsonConfigurationSourceSettings {
        &self.settings
    }

    /// The file location for `T`. The file does not have to exist.
    pub fn configuration_file_path<T: Configured>(&self) -> PathBuf {
        self.resolver.resolve(&self.key_paths.key_path::<T>())
    }

    /// Write `model` as `T`'s configuration file.
    ///
    /// Running watchers for `T` observe the new content on their next poll.
    ///
    /// # Errors
    ///
    /// Returns an error if `model` cannot be serialized or the file cannot be
    /// written.
    pub fn create_config_file<T: Configured>(&self, model: &T) -> Result<()> {
        let path = self.configuration_file_path::<T>();
        let raw = codec::encode(model, &path)?;
        self.store.write(&path, &raw)?;
        tracing::debug!(path = %path.display(), "configuration file written");
        Ok(())
    }

    /// Load `T` from disk, if present, along with what the watcher starts from.
    fn load<T: Configured>(&self, path: &std::path::Path) -> Result<Option<(T, Vec<u8>)>> {
        if !self.store.exists(path) {
            return Ok(None);
        }
        // The file may disappear between the existence check and the read.
        let Some(raw) = self.store.read_if_present(path)? else {
            return Ok(None);
        };
        let value = codec::decode(&raw, path)?;
        Ok(Some((value, raw)))
    }
}

impl<P: KeyPathProvider> ConfigurationSource for JsonConfigurationSource<P> {
    fn handles<T: Configured>(&self) -> bool {
        let path = self.configuration_file_path::<T>();
        let present = self.store.exists(&path);
        tracing::trace!(path = %path.display(), present, "checked configuration file");
        present
    }

    fn get<T: Configured>(
        &self,
        initial: ConfigurationResult<T>,
    ) -> Result<ConfigurationResult<T>> {
        let path = self.configuration_file_path::<T>();

        let (value, fingerprint, last) = match self.load::<T>(&path)? {
            Some((value, raw)) => {
                tracing::debug!(path = %path.display(), "loaded configuration file");
                let last = Some(value.clone());
                (value, Fingerprint::Content(raw), last)
            }
            None => {
                tracing::debug!(
                    path = %path.display(),
                    "no configuration file, using initial value"
                );
                (initial.into_result(), Fingerprint::Missing, None)
            }
        };

        let watcher = PollingWatcher::new(
            path,
            self.polling_interval,
            self.store,
            fingerprint,
            last,
        );
        #[cfg(feature = "metrics")]
        let watcher = watcher.with_metrics(self.metrics.clone());

        let stream = watcher.spawn()?;
        Ok(ConfigurationResult::from_parts(value, stream))
    }

    fn name(&self) -> String {
        format!("json:{}", self.resolver.root().display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::KeyPathRegistry;
    use crate::error::ConfigError;
    use serde::{Deserialize, Serialize};
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Mail {
        host: String,
        port: u16,
    }

    impl Configured for Mail {}

    fn source(root: &std::path::Path) -> JsonConfigurationSource<KeyPathRegistry> {
        let settings = JsonConfigurationSourceSettings::new(root.join("cfg"), 0.01);
        let registry = KeyPathRegistry::new().register::<Mail>("org.app.mail");
        JsonConfigurationSource::new(registry, settings).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_interval() {
        let settings = JsonConfigurationSourceSettings::new("/tmp/x", 0.0);
        let result = JsonConfigurationSource::new(NamespaceKeyPathProvider, settings);
        assert!(matches!(result, Err(ConfigError::InvalidSettings(_))));
    }

    #[test]
    fn test_configuration_file_path_uses_key_path() {
        let temp_dir = TempDir::new().unwrap();
        let source = source(temp_dir.path());
        assert_eq!(
            source.configuration_file_path::<Mail>(),
            temp_dir.path().join("cfg").join("org.app.mail.json")
        );
    }

    #[test]
    fn test_name() {
        let temp_dir = TempDir::new().unwrap();
        assert!(source(temp_dir.path()).name().starts_with("json:"));
    }

    #[test]
    fn test_create_config_file_writes_json() {
        let temp_dir = TempDir::new().unwrap();
        let source = source(temp_dir.path());
        let mail = Mail {
            host: "smtp.local".into(),
            port: 25,
        };

        source.create_config_file(&mail).unwrap();

        assert!(source.handles::<Mail>());
        let raw = fs::read_to_string(source.configuration_file_path::<Mail>()).unwrap();
        let parsed: Mail = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, mail);
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = TempDir::new().unwrap();
        let source = source(temp_dir.path());
        let path = source.configuration_file_path::<Mail>();
        assert!(source.load::<Mail>(&path).unwrap().is_none());
    }

    #[test]
    fn test_get_outside_runtime_fails() {
        let temp_dir = TempDir::new().unwrap();
        let source = source(temp_dir.path());
        let result = source.get(ConfigurationResult::<Mail>::create());
        assert!(matches!(result, Err(ConfigError::WatchError(_))));
    }

    #[tokio::test]
    async fn test_get_malformed_is_deserialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let source = source(temp_dir.path());
        let path = source.configuration_file_path::<Mail>();
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        let result = source.get(ConfigurationResult::<Mail>::create());
        assert!(matches!(result, Err(ConfigError::DeserializationError(_))));
    }
}
