//! Integration tests for threshold changes.

use expiry_core::error::ErrorKind;
use expiry_core::types::UserId;
use expiry_entity::notification::NotificationKind;
use expiry_entity::settings::SettingsUpdate;

use crate::helpers::{TestApp, days_from_today};

#[tokio::test]
async fn test_narrowing_threshold_clears_near_expiry() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Lettuce", days_from_today(5)).await;
    assert_eq!(app.notifications_for(owner, product.id).await.len(), 1);

    app.set_threshold(owner, 3).await;

    assert!(app.notifications_for(owner, product.id).await.is_empty());
}

#[tokio::test]
async fn test_widening_threshold_adds_near_expiry() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Apples", days_from_today(12)).await;
    assert!(app.notifications_for(owner, product.id).await.is_empty());

    app.set_threshold(owner, 14).await;

    let notifications = app.notifications_for(owner, product.id).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::NearExpiry);
    assert_eq!(notifications[0].message, "Apples will expire in 12 days.");
}

#[tokio::test]
async fn test_threshold_change_leaves_other_owners_alone() {
    let app = TestApp::new();
    let alice = UserId::new();
    let bob = UserId::new();
    let bobs = app.create(bob, "Grapes", days_from_today(5)).await;

    app.set_threshold(alice, 1).await;

    assert_eq!(app.notifications_for(bob, bobs.id).await.len(), 1);
}

#[tokio::test]
async fn test_theme_change_keeps_notifications() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Beans", days_from_today(2)).await;
    let before = app.notifications_for(owner, product.id).await;

    let saved = app
        .settings
        .update(
            owner,
            SettingsUpdate {
                theme: Some("dark".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(saved.theme, "dark");
    assert_eq!(saved.notify_days_before, Some(7));
    assert_eq!(app.notifications_for(owner, product.id).await, before);
}

#[tokio::test]
async fn test_out_of_range_threshold_rejected() {
    let app = TestApp::new();
    let owner = UserId::new();

    for days in [0, -3, 366] {
        let err = app
            .settings
            .update(
                owner,
                SettingsUpdate {
                    notify_days_before: Some(days),
                    ..Default::default()
                },
            )
            .await
            .expect_err("invalid threshold");
        assert_eq!(err.kind, ErrorKind::Validation);
    }
    assert_eq!(app.engine.threshold_for(owner).await, 7);
}
