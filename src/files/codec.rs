//! JSON encoding of configuration documents.

use crate::error::{ConfigError, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

/// Decode a document, taking any field it leaves out from `T::default()`.
///
/// Objects are merged key by key at every depth; any other value in the
/// document replaces the default outright.
pub(crate) fn decode<T>(raw: &[u8], path: &Path) -> Result<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    let document: Value = serde_json::from_slice(raw).map_err(|e| {
        ConfigError::DeserializationError(format!("{}: {}", path.display(), e))
    })?;
    let mut merged = serde_json::to_value(T::default()).map_err(|e| {
        ConfigError::SerializationError(format!("{}: default value: {}", path.display(), e))
    })?;
    overlay(&mut merged, document);
    serde_json::from_value(merged).map_err(|e| {
        ConfigError::DeserializationError(format!("{}: {}", path.display(), e))
    })
}

fn overlay(base: &mut Value, document: Value) {
    match (base, document) {
        (Value::Object(base), Value::Object(document)) => {
            for (key, value) in document {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, document) => *base = document,
    }
}

pub(crate) fn encode<T: Serialize>(value: &T, path: &Path) -> Result<Vec<u8>> {
    let mut raw = serde_json::to_vec_pretty(value).map_err(|e| {
        ConfigError::SerializationError(format!("{}: {}", path.display(), e))
    })?;
    raw.push(b'\n');
    Ok(raw)
}
