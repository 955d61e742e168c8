//! Notification repository implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;

use expiry_core::error::{AppError, ErrorKind};
use expiry_core::result::AppResult;
use expiry_core::types::{NotificationId, ProductId, UserId};
use expiry_entity::notification::{Notification, NotificationDraft};

use crate::store::NotificationStore;

/// Repository for notification rows.
///
/// `notifications.product_id` carries a unique constraint, so the
/// one-notification-per-product rule holds even against writers outside
/// this process.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: PgPool,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn find_for_product(&self, product_id: ProductId) -> AppResult<Option<Notification>> {
        sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE product_id = $1")
            .bind(product_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find notification", e)
            })
    }

    async fn list_notifications(&self, owner_id: UserId) -> AppResult<Vec<Notification>> {
        sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list notifications", e))
    }

    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM notifications WHERE product_id = $1")
            .bind(product_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notifications", e)
            })?;
        Ok(result.rows_affected())
    }

    async fn create_notification(&self, draft: &NotificationDraft) -> AppResult<Notification> {
        let notification = Notification::from_draft(draft, Utc::now());
        sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, owner_id, product_id, kind, message, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(notification.id)
        .bind(notification.owner_id)
        .bind(notification.product_id)
        .bind(notification.kind)
        .bind(&notification.message)
        .bind(notification.is_read)
        .bind(notification.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = matches!(&e, sqlx::Error::Database(db) if db.is_unique_violation());
            if duplicate {
                AppError::with_source(
                    ErrorKind::Conflict,
                    format!("Product {} already has a notification", draft.product_id),
                    e,
                )
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
            }
        })
    }

    async fn replace_for_product(
        &self,
        product_id: ProductId,
        draft: Option<&NotificationDraft>,
    ) -> AppResult<Option<Notification>> {
        let Some(draft) = draft else {
            self.delete_for_product(product_id).await?;
            return Ok(None);
        };

        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let fresh = Notification::from_draft(draft, Utc::now());

        // The conditional DO UPDATE leaves an identical row (and its read
        // flag) alone; RETURNING is then empty and the existing row is read
        // back inside the same transaction.
        let replaced = sqlx::query_as::<_, Notification>(
            "INSERT INTO notifications (id, owner_id, product_id, kind, message, is_read, created_at) \
             VALUES ($1, $2, $3, $4, $5, FALSE, $6) \
             ON CONFLICT (product_id) DO UPDATE SET \
                id = EXCLUDED.id, owner_id = EXCLUDED.owner_id, kind = EXCLUDED.kind, \
                message = EXCLUDED.message, is_read = FALSE, created_at = EXCLUDED.created_at \
             WHERE notifications.kind <> EXCLUDED.kind \
                OR notifications.message <> EXCLUDED.message \
                OR notifications.owner_id <> EXCLUDED.owner_id \
             RETURNING *",
        )
        .bind(fresh.id)
        .bind(fresh.owner_id)
        .bind(product_id)
        .bind(fresh.kind)
        .bind(&fresh.message)
        .bind(fresh.created_at)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to replace notification", e))?;

        let current = match replaced {
            Some(row) => row,
            None => sqlx::query_as::<_, Notification>(
                "SELECT * FROM notifications WHERE product_id = $1",
            )
            .bind(product_id)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to read notification", e)
            })?,
        };

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit notification", e)
        })?;

        Ok(Some(current))
    }

    async fn count_unread(&self, owner_id: UserId) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notifications WHERE owner_id = $1 AND is_read = FALSE",
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))?;
        Ok(count as u64)
    }

    async fn mark_read(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        let result =
            sqlx::query("UPDATE notifications SET is_read = TRUE WHERE id = $1 AND owner_id = $2")
                .bind(id)
                .bind(owner_id)
                .execute(&self.pool)
                .await
                .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn mark_all_read(&self, owner_id: UserId) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE notifications SET is_read = TRUE WHERE owner_id = $1 AND is_read = FALSE",
        )
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark all read", e))?;
        Ok(result.rows_affected())
    }

    async fn delete_notification(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete notification", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
