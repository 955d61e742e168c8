//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::product::ExpiryStatus;

/// The two states a product notification can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    /// The product is past its expiry date.
    Expired,
    /// The product expires within the owner's threshold.
    NearExpiry,
}

impl NotificationKind {
    /// The notification kind for a status, if that status warrants one.
    pub fn for_status(status: ExpiryStatus) -> Option<Self> {
        match status {
            ExpiryStatus::Expired => Some(Self::Expired),
            ExpiryStatus::NearExpiry => Some(Self::NearExpiry),
            ExpiryStatus::Safe => None,
        }
    }

    /// Return the kind as its stored string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expired => "EXPIRED",
            Self::NearExpiry => "NEAR_EXPIRY",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
