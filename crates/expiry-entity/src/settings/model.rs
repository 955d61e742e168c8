//! User settings entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use expiry_core::types::UserId;

/// Per-user display and notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserSettings {
    /// The user these settings belong to.
    pub owner_id: UserId,
    /// UI theme, `"light"` or `"dark"`.
    pub theme: String,
    /// UI language code.
    pub language: String,
    /// Near-expiry window in days.
    pub notify_days_before: Option<i32>,
    /// When settings were last updated.
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Settings a user has before saving anything.
    pub fn default_for_user(owner_id: UserId, notify_days_before: i32) -> Self {
        Self {
            owner_id,
            theme: "light".to_string(),
            language: "en".to_string(),
            notify_days_before: Some(notify_days_before),
            updated_at: Utc::now(),
        }
    }
}

/// Partial settings update.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SettingsUpdate {
    /// New theme.
    #[validate(custom(function = "validate_theme"))]
    pub theme: Option<String>,
    /// New language code.
    #[validate(length(min = 2, max = 10))]
    pub language: Option<String>,
    /// New near-expiry window.
    #[validate(range(min = 1, max = 365, message = "Threshold must be between 1 and 365 days"))]
    pub notify_days_before: Option<i32>,
}

impl SettingsUpdate {
    /// Whether the update touches the near-expiry window.
    pub fn changes_threshold(&self, current: &UserSettings) -> bool {
        self.notify_days_before
            .is_some_and(|days| current.notify_days_before != Some(days))
    }

    /// Apply the update on top of `current`.
    pub fn apply(self, current: &mut UserSettings, now: DateTime<Utc>) {
        if let Some(theme) = self.theme {
            current.theme = theme;
        }
        if let Some(language) = self.language {
            current.language = language;
        }
        if let Some(days) = self.notify_days_before {
            current.notify_days_before = Some(days);
        }
        current.updated_at = now;
    }
}

fn validate_theme(theme: &str) -> Result<(), validator::ValidationError> {
    match theme {
        "light" | "dark" => Ok(()),
        _ => Err(validator::ValidationError::new("theme")),
    }
}
