//! Background worker configuration.

use serde::{Deserialize, Serialize};

/// Background sweep configuration.
///
/// Notifications are only recomputed on product writes unless the sweep is
/// switched on here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the periodic re-derivation sweep runs.
    #[serde(default)]
    pub sweep_enabled: bool,
    /// Six-field cron expression (with seconds) for the sweep.
    #[serde(default = "default_sweep_cron")]
    pub sweep_cron: String,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            sweep_enabled: false,
            sweep_cron: default_sweep_cron(),
        }
    }
}

fn default_sweep_cron() -> String {
    "0 5 0 * * *".to_string()
}
