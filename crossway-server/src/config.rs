//! Server configuration, read from TOML with CLI overrides

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crossway_core::GraphConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    /// GeoJSON file with the road features served by this instance
    pub roads: PathBuf,
    pub request_timeout_secs: u64,
    pub max_concurrent_requests: usize,
    /// Graph build settings (snap tolerance, feature property names)
    pub graph: GraphConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 8080)),
            roads: PathBuf::from("roads.geojson"),
            request_timeout_secs: 30,
            max_concurrent_requests: 1024,
            graph: GraphConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }
}
