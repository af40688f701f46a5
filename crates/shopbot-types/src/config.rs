//! Server configuration types.
//!
//! `ServerConfig` represents the optional `config.toml` in the data directory.
//! All fields have defaults so a missing file means a working server.

use serde::{Deserialize, Serialize};

/// Top-level configuration for the Shopbot backend.
///
/// Loaded from `{data_dir}/config.toml`; CLI flags override host/port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind address for the HTTP listener.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port for the HTTP listener.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Conversations older than this many days are deleted by the sweeper.
    #[serde(default = "default_retention_days")]
    pub conversation_retention_days: i64,

    /// How often the background expiry sweep runs, in seconds.
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3007
}

fn default_retention_days() -> i64 {
    1
}

fn default_sweep_interval_secs() -> u64 {
    3600
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            conversation_retention_days: default_retention_days(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}
