//! Raw file access for configuration documents.

use crate::error::{ConfigError, Result};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Reads and writes configuration documents.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so a concurrent reader sees either the old or the
/// new document and never a partial one.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationFileStore;

impl ConfigurationFileStore {
    /// Create a store.
    pub fn new() -> Self {
        Self
    }

    /// Whether the parent directory and the file both exist.
    ///
    /// A missing directory and a missing file both report `false`.
    pub fn exists(&self, path: &Path) -> bool {
        let dir_exists = path.parent().is_some_and(|dir| dir.is_dir());
        dir_exists && path.is_file()
    }

    /// Read the raw document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if the file (or its directory) is
    /// missing and [`ConfigError::IoError`] if it cannot be read.
    pub fn read(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
            _ => ConfigError::IoError(e),
        })
    }

    /// Read the raw document, mapping a missing file to `None`.
    pub fn read_if_present(&self, path: &Path) -> Result<Option<Vec<u8>>> {
        match self.read(path) {
            Ok(raw) => Ok(Some(raw)),
            Err(ConfigError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Write the raw document, creating the parent directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IoError`] if the directory, the temporary file or
    /// the final rename fails.
    pub fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        let dir = path.parent().ok_or_else(|| {
            ConfigError::Other(format!("{} has no parent directory", path.display()))
        })?;
        let dir = if dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            dir
        };
        fs::create_dir_all(dir)?;

        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| ConfigError::IoError(e.error))?;

        tracing::trace!(path = %path.display(), bytes = contents.len(), "wrote configuration file");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_exists_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent").join("app.json");
        assert!(!ConfigurationFileStore.exists(&path));
    }

    #[test]
    fn test_exists_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        assert!(!ConfigurationFileStore.exists(&path));
    }

    #[test]
    fn test_exists_directory_is_not_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        fs::create_dir(&path).unwrap();
        assert!(!ConfigurationFileStore.exists(&path));
    }

    #[test]
    fn test_write_creates_directory_and_reads_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("deeper").join("app.json");
        let store = ConfigurationFileStore::new();

        store.write(&path, br#"{"a":1}"#).unwrap();

        assert!(store.exists(&path));
        assert_eq!(store.read(&path).unwrap(), br#"{"a":1}"#);
    }

    #[test]
    fn test_write_overwrites_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        let store = ConfigurationFileStore::new();

        store.write(&path, b"first").unwrap();
        store.write(&path, b"second").unwrap();

        assert_eq!(store.read(&path).unwrap(), b"second");
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_read_missing_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("app.json");
        let store = ConfigurationFileStore::new();

        assert!(matches!(store.read(&path), Err(ConfigError::NotFound(_))));
        assert!(store.read_if_present(&path).unwrap().is_none());
    }

    #[test]
    fn test_read_directory_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let result = ConfigurationFileStore.read(temp_dir.path());
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
