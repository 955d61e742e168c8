//! Owner-facing notification reads and read-state management.
//!
//! Notifications are created and removed only by the engine. This service
//! lets an owner list them and flip their read flag.

use std::sync::Arc;

use tracing::info;

use expiry_core::error::AppError;
use expiry_core::types::{NotificationId, UserId};
use expiry_database::store::NotificationStore;
use expiry_entity::notification::Notification;

/// Manages an owner's view of their notifications.
#[derive(Debug, Clone)]
pub struct NotificationService {
    /// Notification store.
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationService {
    /// Creates a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Lists the owner's notifications, newest first.
    pub async fn list(&self, owner_id: UserId) -> Result<Vec<Notification>, AppError> {
        self.notifications.list_notifications(owner_id).await
    }

    /// Gets the unread notification count.
    pub async fn unread_count(&self, owner_id: UserId) -> Result<u64, AppError> {
        self.notifications.count_unread(owner_id).await
    }

    /// Marks a notification as read.
    ///
    /// A notification belonging to someone else is reported as not found.
    pub async fn mark_read(
        &self,
        owner_id: UserId,
        notification_id: NotificationId,
    ) -> Result<(), AppError> {
        if !self.notifications.mark_read(notification_id, owner_id).await? {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )));
        }
        Ok(())
    }

    /// Marks all of the owner's notifications as read.
    pub async fn mark_all_read(&self, owner_id: UserId) -> Result<u64, AppError> {
        let changed = self.notifications.mark_all_read(owner_id).await?;
        info!(owner_id = %owner_id, changed, "Marked all notifications read");
        Ok(changed)
    }

    /// Dismisses a notification.
    ///
    /// The engine recreates it on the product's next write if the product
    /// still warrants one.
    pub async fn delete(
        &self,
        owner_id: UserId,
        notification_id: NotificationId,
    ) -> Result<(), AppError> {
        if !self
            .notifications
            .delete_notification(notification_id, owner_id)
            .await?
        {
            return Err(AppError::not_found(format!(
                "Notification {notification_id} not found"
            )));
        }
        Ok(())
    }
}
