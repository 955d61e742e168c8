//! Integration tests for store failures during derivation.

use expiry_core::error::ErrorKind;
use expiry_core::types::UserId;
use expiry_entity::product::ProductUpdate;

use crate::helpers::{TestApp, days_from_today, new_product};

#[tokio::test]
async fn test_notification_write_failure_surfaces() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.store.fail_notification_writes(true);

    let err = app
        .products
        .create(owner, new_product("Cheese", days_from_today(-1)))
        .await
        .expect_err("derivation should fail");
    assert_eq!(err.kind, ErrorKind::Database);
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_failed_update_leaves_old_notification() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Cod", days_from_today(-1)).await;
    let before = app.notifications_for(owner, product.id).await;

    app.store.fail_notification_writes(true);
    let err = app
        .products
        .update(
            owner,
            product.id,
            ProductUpdate {
                exp_date: Some(days_from_today(90)),
                ..Default::default()
            },
        )
        .await
        .expect_err("derivation should fail");
    assert_eq!(err.kind, ErrorKind::Database);
    assert_eq!(app.notifications_for(owner, product.id).await, before);

    app.store.fail_notification_writes(false);
    app.products
        .update(owner, product.id, ProductUpdate::default())
        .await
        .expect("retry");
    assert!(app.notifications_for(owner, product.id).await.is_empty());
}

#[tokio::test]
async fn test_settings_failure_falls_back_to_default() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.set_threshold(owner, 2).await;
    app.store.fail_settings_reads(true);

    let product = app.create(owner, "Figs", days_from_today(5)).await;

    assert_eq!(app.notifications_for(owner, product.id).await.len(), 1);
}

#[tokio::test]
async fn test_sweep_reports_failures() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.create(owner, "Nuts", days_from_today(3)).await;
    app.create(owner, "Oats", days_from_today(30)).await;

    app.store.fail_notification_writes(true);
    let report = app.engine.sweep().await.expect("sweep");
    assert_eq!(report.processed, 0);
    assert_eq!(report.failed, 2);
}
