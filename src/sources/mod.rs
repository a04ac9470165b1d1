//! Configuration source implementations.

mod config_source;
mod json;

pub use config_source::ConfigurationSource;
pub use json::JsonConfigurationSource;
