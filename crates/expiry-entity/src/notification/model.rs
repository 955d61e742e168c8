//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use expiry_core::types::{NotificationId, ProductId, UserId};

use super::kind::NotificationKind;

/// The single expiry notification attached to a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: NotificationId,
    /// The recipient, copied from the product's owner.
    pub owner_id: UserId,
    /// The product this notification describes. Unique across notifications.
    pub product_id: ProductId,
    /// Expired or near expiry.
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
    /// Whether the owner has read this notification.
    pub is_read: bool,
    /// When the notification was derived.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Build an unread notification.
    pub fn new(
        owner_id: UserId,
        product_id: ProductId,
        kind: NotificationKind,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            owner_id,
            product_id,
            kind,
            message: message.into(),
            is_read: false,
            created_at: now,
        }
    }

    /// Build an unread notification from a draft.
    pub fn from_draft(draft: &NotificationDraft, now: DateTime<Utc>) -> Self {
        Self::new(
            draft.owner_id,
            draft.product_id,
            draft.kind,
            draft.message.clone(),
            now,
        )
    }

    /// Check if the notification has not been read yet.
    pub fn is_unread(&self) -> bool {
        !self.is_read
    }

    /// Whether this stored notification already says what `draft` says.
    pub fn matches(&self, draft: &NotificationDraft) -> bool {
        self.owner_id == draft.owner_id && self.kind == draft.kind && self.message == draft.message
    }
}

/// The content of a notification before it is stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationDraft {
    /// The recipient.
    pub owner_id: UserId,
    /// The product the notification describes.
    pub product_id: ProductId,
    /// Expired or near expiry.
    pub kind: NotificationKind,
    /// Human-readable text.
    pub message: String,
}
