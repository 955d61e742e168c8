//! Integration tests for which notification a product write produces.

use expiry_core::types::UserId;
use expiry_entity::notification::NotificationKind;
use expiry_entity::product::ProductUpdate;

use crate::helpers::{TestApp, days_from_today};

#[tokio::test]
async fn test_expired_product_gets_expired_notification() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Milk", days_from_today(-1)).await;

    let notifications = app.notifications_for(owner, product.id).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::Expired);
    assert_eq!(notifications[0].message, "Milk expired on 2024-03-14.");
    assert_eq!(notifications[0].owner_id, owner);
    assert!(!notifications[0].is_read);
}

#[tokio::test]
async fn test_near_expiry_uses_default_window() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Bread", days_from_today(5)).await;

    let notifications = app.notifications_for(owner, product.id).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0].kind, NotificationKind::NearExpiry);
    assert_eq!(notifications[0].message, "Bread will expire in 5 days.");
}

#[tokio::test]
async fn test_far_future_product_has_none() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Rice", days_from_today(30)).await;

    assert!(app.notifications_for(owner, product.id).await.is_empty());
}

#[tokio::test]
async fn test_custom_threshold_narrows_window() {
    let app = TestApp::new();
    let owner = UserId::new();
    app.set_threshold(owner, 3).await;

    let product = app.create(owner, "Cream", days_from_today(5)).await;
    assert!(app.notifications_for(owner, product.id).await.is_empty());

    let inside = app.create(owner, "Soup", days_from_today(3)).await;
    assert_eq!(app.notifications_for(owner, inside.id).await.len(), 1);
}

#[tokio::test]
async fn test_window_edges() {
    let app = TestApp::new();
    let owner = UserId::new();

    let today = app.create(owner, "Tofu", days_from_today(0)).await;
    let edge = app.create(owner, "Kale", days_from_today(7)).await;
    let past_edge = app.create(owner, "Leek", days_from_today(8)).await;

    let today_notes = app.notifications_for(owner, today.id).await;
    assert_eq!(today_notes[0].kind, NotificationKind::NearExpiry);
    assert_eq!(today_notes[0].message, "Tofu expires today.");
    assert_eq!(app.notifications_for(owner, edge.id).await.len(), 1);
    assert!(app.notifications_for(owner, past_edge.id).await.is_empty());
}

#[tokio::test]
async fn test_moving_expiry_out_clears_notification() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Ham", days_from_today(-2)).await;
    assert_eq!(app.notifications_for(owner, product.id).await.len(), 1);

    app.products
        .update(
            owner,
            product.id,
            ProductUpdate {
                exp_date: Some(days_from_today(60)),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert!(app.notifications_for(owner, product.id).await.is_empty());
}

#[tokio::test]
async fn test_never_more_than_one_per_product() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Salmon", days_from_today(6)).await;

    for offset in [-3, 2, 4, 1, -1, 0, 7] {
        app.products
            .update(
                owner,
                product.id,
                ProductUpdate {
                    exp_date: Some(days_from_today(offset)),
                    ..Default::default()
                },
            )
            .await
            .expect("update");
        assert_eq!(app.notifications_for(owner, product.id).await.len(), 1);
    }
    assert_eq!(app.store.notification_count().await, 1);
}

#[tokio::test]
async fn test_rederiving_unchanged_product_is_stable() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Feta", days_from_today(2)).await;
    let first = app.notifications_for(owner, product.id).await;

    app.notifications
        .mark_read(owner, first[0].id)
        .await
        .expect("mark read");
    app.products
        .update(
            owner,
            product.id,
            ProductUpdate {
                quantity: Some(3),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    let second = app.notifications_for(owner, product.id).await;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].id, first[0].id);
    assert_eq!(second[0].message, first[0].message);
    assert!(second[0].is_read);
}

#[tokio::test]
async fn test_changed_message_is_fresh_and_unread() {
    let app = TestApp::new();
    let owner = UserId::new();
    let product = app.create(owner, "Brie", days_from_today(4)).await;
    let first = app.notifications_for(owner, product.id).await;
    app.notifications
        .mark_read(owner, first[0].id)
        .await
        .expect("mark read");

    app.products
        .update(
            owner,
            product.id,
            ProductUpdate {
                name: Some("Camembert".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    let second = app.notifications_for(owner, product.id).await;
    assert_eq!(second.len(), 1);
    assert_ne!(second[0].id, first[0].id);
    assert_eq!(second[0].message, "Camembert will expire in 4 days.");
    assert!(!second[0].is_read);
}

#[tokio::test]
async fn test_inverted_dates_still_derive() {
    let app = TestApp::new();
    let owner = UserId::new();
    let mut input = crate::helpers::new_product("Odd", days_from_today(-10));
    input.mfg_date = days_from_today(-1);

    let write = app.products.create(owner, input).await.expect("create");
    assert!(write.product.has_inverted_dates());
    let notifications = app.notifications_for(owner, write.product.id).await;
    assert_eq!(notifications[0].kind, NotificationKind::Expired);
}

#[tokio::test]
async fn test_longest_valid_name_still_notifies() {
    let app = TestApp::new();
    let owner = UserId::new();
    let name = "Q".repeat(200);
    let product = app.create(owner, &name, days_from_today(-1)).await;

    let notifications = app.notifications_for(owner, product.id).await;
    assert_eq!(notifications.len(), 1);
    assert_eq!(
        notifications[0].message,
        format!("{name} expired on 2024-03-14.")
    );
}
