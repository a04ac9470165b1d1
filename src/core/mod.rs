//! Core configuration types.

mod key_path;
mod live;
mod result;
mod settings;

pub use key_path::{
    Configured, KeyPathProvider, KeyPathRegistry, NamespaceKeyPathProvider, namespace_of,
};
pub use live::LiveConfig;
pub use result::ConfigurationResult;
pub use settings::JsonConfigurationSourceSettings;
