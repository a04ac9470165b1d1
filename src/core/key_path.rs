//! Mapping configuration types to stable namespaces.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::any::TypeId;
use std::borrow::Cow;
use std::collections::HashMap;

/// A strongly-typed configuration shape.
///
/// Implementors are stored as one JSON document per type. The document's name
/// comes from a [`KeyPathProvider`]; by default that is [`Configured::key_path`],
/// the fully-qualified type path rendered with `.` separators.
///
/// # Examples
///
/// ```rust
/// use reactive_config::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// struct FeatureFlags {
///     beta: bool,
/// }
///
/// impl Configured for FeatureFlags {
///     fn key_path() -> std::borrow::Cow<'static, str> {
///         "org.app.flags".into()
///     }
/// }
///
/// assert_eq!(FeatureFlags::key_path(), "org.app.flags");
/// ```
pub trait Configured:
    Serialize + DeserializeOwned + Default + PartialEq + Clone + Send + Sync + 'static
{
    /// The namespace this type is stored under.
    ///
    /// The default is built from [`std::any::type_name`], whose output is not
    /// guaranteed to stay the same across compiler versions or when the type
    /// moves between modules. Override this method, or register the type with
    /// a [`KeyPathRegistry`], when the file name must stay fixed.
    fn key_path() -> Cow<'static, str> {
        Cow::Owned(namespace_of::<Self>())
    }
}

/// Render a Rust type path as a file-name safe namespace.
///
/// `my_app::settings::Mail` becomes `my_app.settings.Mail`. Whitespace is
/// dropped and any other character outside `[A-Za-z0-9._-]` becomes `_`.
/// The result follows [`std::any::type_name`] and is only as stable as it is.
pub fn namespace_of<T: ?Sized>() -> String {
    let name = std::any::type_name::<T>().replace("::", ".");
    name.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolves the namespace for a configuration type.
pub trait KeyPathProvider: Send + Sync {
    /// Get the namespace for `T`.
    fn key_path<T: Configured>(&self) -> String;
}

/// Uses each type's own [`Configured::key_path`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NamespaceKeyPathProvider;

impl KeyPathProvider for NamespaceKeyPathProvider {
    fn key_path<T: Configured>(&self) -> String {
        T::key_path().into_owned()
    }
}

/// Explicit type-to-namespace registry.
///
/// Types that were never registered fall back to [`Configured::key_path`].
///
/// # Examples
///
/// ```rust
/// use reactive_config::core::{KeyPathProvider, KeyPathRegistry};
/// # use reactive_config::core::Configured;
/// # #[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// # struct Mail { host: String }
/// # impl Configured for Mail {}
///
/// let registry = KeyPathRegistry::new().register::<Mail>("org.app.mail");
/// assert_eq!(registry.key_path::<Mail>(), "org.app.mail");
/// ```
#[derive(Debug, Clone, Default)]
pub struct KeyPathRegistry {
    entries: HashMap<TypeId, String>,
}

impl KeyPathRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the namespace for `T`, replacing any earlier entry.
    pub fn register<T: Configured>(mut self, namespace: impl Into<String>) -> Self {
        self.entries.insert(TypeId::of::<T>(), namespace.into());
        self
    }

    /// Whether `T` has an explicit entry.
    pub fn contains<T: Configured>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyPathProvider for KeyPathRegistry {
    fn key_path<T: Configured>(&self) -> String {
        self.entries
            .get(&TypeId::of::<T>())
            .cloned()
            .unwrap_or_else(|| T::key_path().into_owned())
    }
}
