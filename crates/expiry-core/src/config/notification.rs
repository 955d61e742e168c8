//! Notification derivation configuration.

use serde::{Deserialize, Serialize};

/// Threshold applied when a user has no stored `notify_days_before`.
pub const DEFAULT_THRESHOLD_DAYS: i32 = 7;

/// Settings for the notification engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    /// Near-expiry window, in days, for users without a settings record.
    #[serde(default = "default_threshold_days")]
    pub default_threshold_days: i32,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            default_threshold_days: default_threshold_days(),
        }
    }
}

fn default_threshold_days() -> i32 {
    DEFAULT_THRESHOLD_DAYS
}
