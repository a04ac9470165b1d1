//! Example demonstrating polling hot-reload of a typed JSON configuration.
//!
//! This example shows how to:
//! - Create a configuration file for a type if none exists
//! - Read the current value
//! - React to later edits through a subscription and a live view
//!
//! Run with: cargo run --example hot_reload
//!
//! While running, edit demos/config/demo.server.json to see updates.

use reactive_config::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct ServerConfig {
    port: u16,
    host: String,
    max_connections: u32,
}

impl Configured for ServerConfig {
    fn key_path() -> Cow<'static, str> {
        Cow::Borrowed("demo.server")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Hot Reload Example ===\n");

    let settings = JsonConfigurationSourceSettings::new("demos/config", 0.5);
    let source = JsonConfigurationSource::new(NamespaceKeyPathProvider, settings)?;

    if !source.handles::<ServerConfig>() {
        source.create_config_file(&ServerConfig {
            port: 8080,
            host: "localhost".to_string(),
            max_connections: 10,
        })?;
        println!(
            "Created {}",
            source.configuration_file_path::<ServerConfig>().display()
        );
    }

    let live = source
        .get(ConfigurationResult::<ServerConfig>::create())?
        .into_live()?;
    let cfg = live.get();
    println!("Initial: {}:{} (max {})", cfg.host, cfg.port, cfg.max_connections);

    let _subscription = source
        .get(ConfigurationResult::<ServerConfig>::create())?
        .into_stream()
        .subscribe(|cfg| {
            println!("Changed: {}:{} (max {})", cfg.host, cfg.port, cfg.max_connections);
        })?;

    println!("\nWatching for 30 seconds...");
    for _ in 0..6 {
        tokio::time::sleep(std::time::Duration::from_secs(5)).await;
        let cfg = live.get();
        println!("Live view: {}:{}", cfg.host, cfg.port);
    }

    Ok(())
}
