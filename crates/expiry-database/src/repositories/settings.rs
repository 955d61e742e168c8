//! User settings repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use expiry_core::error::{AppError, ErrorKind};
use expiry_core::result::AppResult;
use expiry_core::types::UserId;
use expiry_entity::settings::UserSettings;

use crate::store::SettingsStore;

/// Repository for per-user settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Create a new settings repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsStore for SettingsRepository {
    async fn find_settings(&self, owner_id: UserId) -> AppResult<Option<UserSettings>> {
        sqlx::query_as::<_, UserSettings>("SELECT * FROM user_settings WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to get settings", e))
    }

    async fn upsert_settings(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        sqlx::query_as::<_, UserSettings>(
            "INSERT INTO user_settings (owner_id, theme, language, notify_days_before, updated_at) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (owner_id) DO UPDATE SET theme = $2, language = $3, \
             notify_days_before = $4, updated_at = $5 \
             RETURNING *",
        )
        .bind(settings.owner_id)
        .bind(&settings.theme)
        .bind(&settings.language)
        .bind(settings.notify_days_before)
        .bind(settings.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert settings", e))
    }

    async fn find_threshold(&self, owner_id: UserId) -> AppResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT notify_days_before FROM user_settings WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await
        .map(Option::flatten)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to get threshold", e))
    }
}
