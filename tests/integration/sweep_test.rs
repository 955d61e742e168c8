//! Integration tests for calendar drift and the sweep.

use expiry_core::types::UserId;
use expiry_entity::notification::NotificationKind;

use crate::helpers::{TestApp, days_from_today};

#[tokio::test]
async fn test_notification_lags_until_sweep() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Spinach", days_from_today(1)).await;

    app.clock.advance_days(3);

    // Nothing re-derives on its own.
    let stale = app.notifications_for(owner, product.id).await;
    assert_eq!(stale[0].kind, NotificationKind::NearExpiry);
    assert_eq!(stale[0].message, "Spinach will expire in 1 day.");

    let report = app.engine.sweep().await.expect("sweep");
    assert_eq!(report.processed, 1);
    assert_eq!(report.expired, 1);
    assert_eq!(report.failed, 0);

    let fresh = app.notifications_for(owner, product.id).await;
    assert_eq!(fresh.len(), 1);
    assert_eq!(fresh[0].kind, NotificationKind::Expired);
    assert_eq!(fresh[0].message, "Spinach expired on 2024-03-16.");
}

#[tokio::test]
async fn test_sweep_counts_every_owner() {
    let app = TestApp::new();
    let alice = UserId::new();
    let bob = UserId::new();
    app.create(alice, "One", days_from_today(-1)).await;
    app.create(alice, "Two", days_from_today(3)).await;
    app.create(bob, "Three", days_from_today(100)).await;
    app.set_threshold(bob, 200).await;

    let report = app.engine.sweep().await.expect("sweep");
    assert_eq!(report.processed, 3);
    assert_eq!(report.expired, 1);
    assert_eq!(report.near_expiry, 2);
    assert_eq!(report.safe, 0);
    assert_eq!(app.store.notification_count().await, 3);
}

#[tokio::test]
async fn test_sweep_twice_changes_nothing() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Chard", days_from_today(2)).await;

    app.engine.sweep().await.expect("sweep");
    let first = app.notifications_for(owner, product.id).await;
    app.engine.sweep().await.expect("sweep");
    let second = app.notifications_for(owner, product.id).await;

    assert_eq!(first, second);
}
