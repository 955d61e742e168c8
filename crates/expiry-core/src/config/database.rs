//! Database configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// PostgreSQL pool settings for the product, settings, and notification
/// tables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL.
    pub url: String,
    /// Pool ceiling.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// How long to wait for a free connection, in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// How long an unused connection may stay open, in seconds.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Apply pending migrations when the daemon starts.
    #[serde(default = "default_migrate_on_start")]
    pub migrate_on_start: bool,
}

impl DatabaseConfig {
    /// Acquire timeout as a [`Duration`].
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_seconds)
    }

    /// Idle timeout as a [`Duration`].
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_seconds)
    }
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_migrate_on_start() -> bool {
    true
}
