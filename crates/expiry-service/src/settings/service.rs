//! User settings with get-or-default semantics.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use expiry_core::error::AppError;
use expiry_core::types::UserId;
use expiry_database::store::SettingsStore;
use expiry_entity::settings::{SettingsUpdate, UserSettings};

use crate::notification::NotificationEngine;
use crate::validation::validate;

/// Reads and updates per-user settings.
#[derive(Debug, Clone)]
pub struct SettingsService {
    /// Settings store.
    settings: Arc<dyn SettingsStore>,
    /// Engine, re-run across the owner's products when their window moves.
    engine: Arc<NotificationEngine>,
}

impl SettingsService {
    /// Creates a new settings service.
    pub fn new(settings: Arc<dyn SettingsStore>, engine: Arc<NotificationEngine>) -> Self {
        Self { settings, engine }
    }

    /// The owner's settings, or the defaults if they never saved any.
    pub async fn get(&self, owner_id: UserId) -> Result<UserSettings, AppError> {
        Ok(self
            .settings
            .find_settings(owner_id)
            .await?
            .unwrap_or_else(|| self.defaults(owner_id)))
    }

    /// Applies a partial update.
    ///
    /// When the near-expiry window changes, every product the owner holds is
    /// re-derived before this returns.
    pub async fn update(
        &self,
        owner_id: UserId,
        update: SettingsUpdate,
    ) -> Result<UserSettings, AppError> {
        validate(&update)?;

        let mut current = self.get(owner_id).await?;
        let threshold_changed = update.changes_threshold(&current);
        update.apply(&mut current, Utc::now());

        let saved = self.settings.upsert_settings(&current).await?;
        info!(owner_id = %owner_id, threshold_changed, "Settings updated");

        if threshold_changed {
            self.engine.rederive_owner(owner_id).await?;
        }
        Ok(saved)
    }

    fn defaults(&self, owner_id: UserId) -> UserSettings {
        UserSettings::default_for_user(owner_id, self.engine.default_threshold_days())
    }
}
