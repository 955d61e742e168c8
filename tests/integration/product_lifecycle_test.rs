//! Integration tests for product CRUD and the notification inbox.

use expiry_core::error::ErrorKind;
use expiry_core::types::UserId;
use expiry_entity::product::ProductUpdate;

use crate::helpers::{TestApp, days_from_today, new_product};

#[tokio::test]
async fn test_delete_removes_product_and_notification() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Yogurt", days_from_today(1)).await;
    assert_eq!(app.store.notification_count().await, 1);

    app.products.delete(owner, product.id).await.expect("delete");

    assert_eq!(app.store.notification_count().await, 0);
    let err = app.products.get(owner, product.id).await.expect_err("gone");
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_products_are_scoped_to_owner() {
    let app = TestApp::new();
    let alice = UserId::new();
    let bob = UserId::new();
    let product = app.create(alice, "Pears", days_from_today(2)).await;

    assert!(app.products.list(bob).await.expect("list").is_empty());
    assert!(app.notifications.list(bob).await.expect("list").is_empty());

    let err = app
        .products
        .update(
            bob,
            product.id,
            ProductUpdate {
                exp_date: Some(days_from_today(90)),
                ..Default::default()
            },
        )
        .await
        .expect_err("foreign product");
    assert_eq!(err.kind, ErrorKind::NotFound);
    assert_eq!(app.notifications_for(alice, product.id).await.len(), 1);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = TestApp::new();
    let owner = UserId::new();
    let first = app.create(owner, "First", days_from_today(1)).await;
    let second = app.create(owner, "Second", days_from_today(2)).await;

    let products = app.products.list(owner).await.expect("list");
    assert_eq!(products.len(), 2);
    assert_eq!(products[0].id, second.id);
    assert_eq!(products[1].id, first.id);
}

#[tokio::test]
async fn test_negative_quantity_rejected_without_side_effects() {
    let app = TestApp::new();
    let owner = UserId::new();
    let mut input = new_product("Broken", days_from_today(-1));
    input.quantity = -1;

    let err = app.products.create(owner, input).await.expect_err("invalid");
    assert_eq!(err.kind, ErrorKind::Validation);
    assert!(app.products.list(owner).await.expect("list").is_empty());
    assert_eq!(app.store.notification_count().await, 0);
}

#[tokio::test]
async fn test_inbox_read_state() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.create(owner, "A", days_from_today(-1)).await;
    app.create(owner, "B", days_from_today(3)).await;
    app.create(owner, "C", days_from_today(40)).await;

    assert_eq!(app.notifications.unread_count(owner).await.expect("count"), 2);
    assert_eq!(app.notifications.mark_all_read(owner).await.expect("mark"), 2);
    assert_eq!(app.notifications.unread_count(owner).await.expect("count"), 0);
}

#[tokio::test]
async fn test_dismissed_notification_returns_on_next_write() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Olives", days_from_today(-5)).await;
    let notification = app.notifications_for(owner, product.id).await.remove(0);

    app.notifications
        .delete(owner, notification.id)
        .await
        .expect("dismiss");
    assert!(app.notifications_for(owner, product.id).await.is_empty());

    app.products
        .update(owner, product.id, ProductUpdate::default())
        .await
        .expect("update");
    assert_eq!(app.notifications_for(owner, product.id).await.len(), 1);
}

#[tokio::test]
async fn test_stats_match_notifications() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.create(owner, "Expired", days_from_today(-1)).await;
    app.create(owner, "Soon", days_from_today(6)).await;
    app.create(owner, "Later", days_from_today(20)).await;
    app.create(owner, "Much later", days_from_today(200)).await;

    let stats = app.report.stats(owner).await.expect("stats");
    assert_eq!(stats.total, 4);
    assert_eq!(stats.expired, 1);
    assert_eq!(stats.near_expiry, 1);
    assert_eq!(stats.safe, 2);
    assert_eq!(
        app.notifications.list(owner).await.expect("list").len() as u64,
        stats.expired + stats.near_expiry
    );
}
