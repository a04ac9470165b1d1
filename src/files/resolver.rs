//! Namespace to file path resolution.

use std::path::{Path, PathBuf};

/// Extension used for every configuration document.
pub const JSON_EXTENSION: &str = "json";

/// Resolves a namespace to `<root>/<namespace>.json`.
///
/// Resolution is pure: the root directory does not have to exist.
///
/// # Examples
///
/// ```rust
/// use reactive_config::files::PathResolver;
/// use std::path::Path;
///
/// let resolver = PathResolver::new("/etc/my-app");
/// assert_eq!(
///     resolver.resolve("org.app.lib"),
///     Path::new("/etc/my-app/org.app.lib.json")
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    /// Create a resolver rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve the file location for a namespace.
    ///
    /// The extension is appended rather than substituted, so dotted namespaces
    /// such as `org.app.lib` keep every segment.
    pub fn resolve(&self, namespace: &str) -> PathBuf {
        self.root.join(format!("{}.{}", namespace, JSON_EXTENSION))
    }
}
