//! File layout and raw file access.

pub(crate) mod codec;
mod resolver;
mod store;

pub use resolver::{JSON_EXTENSION, PathResolver};
pub use store::ConfigurationFileStore;
