//! The derivation rule: which notification, if any, a product warrants.
//!
//! Everything here is pure. Reading "today" and the owner's settings
//! is the engine's job.

use chrono::NaiveDate;

use expiry_entity::notification::{NotificationDraft, NotificationKind};
use expiry_entity::product::{ExpiryStatus, Product};
use expiry_entity::settings::UserSettings;

/// The effective near-expiry window for a user.
///
/// Returns the stored `notify_days_before` when it is present and positive,
/// otherwise `default_days`.
pub fn resolve_threshold(settings: Option<&UserSettings>, default_days: i32) -> i32 {
    effective_threshold(settings.and_then(|s| s.notify_days_before), default_days)
}

/// Same as [`resolve_threshold`], starting from the bare stored value.
pub fn effective_threshold(stored: Option<i32>, default_days: i32) -> i32 {
    stored.filter(|days| *days > 0).unwrap_or(default_days)
}

/// Compute the notification `product` should carry on `today`.
///
/// `None` means the product must have no notification.
pub fn derive_notification(
    product: &Product,
    threshold_days: i32,
    today: NaiveDate,
) -> Option<NotificationDraft> {
    let days_left = product.days_until_expiry(today);
    let status = ExpiryStatus::classify(days_left, threshold_days);
    let kind = NotificationKind::for_status(status)?;

    Some(NotificationDraft {
        owner_id: product.owner_id,
        product_id: product.id,
        kind,
        message: message_for(product, kind, days_left),
    })
}

fn message_for(product: &Product, kind: NotificationKind, days_left: i64) -> String {
    match kind {
        NotificationKind::Expired => {
            format!("{} expired on {}.", product.name, product.exp_date.format("%Y-%m-%d"))
        }
        NotificationKind::NearExpiry => match days_left {
            0 => format!("{} expires today.", product.name),
            1 => format!("{} will expire in 1 day.", product.name),
            n => format!("{} will expire in {n} days.", product.name),
        },
    }
}
