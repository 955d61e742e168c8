//! Integration tests for the PostgreSQL repositories.
//!
//! Skipped unless `EXPIRY_TEST_DATABASE_URL` or `DATABASE_URL` is set.

use std::sync::Arc;

use chrono::Utc;

use expiry_core::error::ErrorKind;
use expiry_core::traits::FixedClock;
use expiry_core::types::UserId;
use expiry_database::repositories::Repositories;
use expiry_database::store::{NotificationStore, ProductStore};
use expiry_entity::notification::{NotificationDraft, NotificationKind};
use expiry_entity::product::Product;
use expiry_service::{NotificationEngine, ProductService};

use crate::helpers::{days_from_today, new_product, postgres, today};

async fn stored_product(repos: &Repositories, owner: UserId, name: &str) -> Product {
    let product = Product::from_new(owner, new_product(name, days_from_today(-1)), Utc::now());
    repos
        .products
        .insert_product(&product)
        .await
        .expect("Failed to insert product")
}

fn draft(product: &Product, kind: NotificationKind, message: &str) -> NotificationDraft {
    NotificationDraft {
        owner_id: product.owner_id,
        product_id: product.id,
        kind,
        message: message.to_string(),
    }
}

#[tokio::test]
async fn test_pg_replace_same_draft_keeps_row() {
    let Some(repos) = postgres().await else {
        return;
    };
    let owner = UserId::new();
    let product = stored_product(&repos, owner, "Yogurt").await;
    let expired = draft(&product, NotificationKind::Expired, "Yogurt expired on 2024-03-14.");

    let first = repos
        .notifications
        .replace_for_product(product.id, Some(&expired))
        .await
        .expect("replace")
        .expect("notification");
    assert!(repos.notifications.mark_read(first.id, owner).await.expect("mark read"));

    let second = repos
        .notifications
        .replace_for_product(product.id, Some(&expired))
        .await
        .expect("replace")
        .expect("notification");

    assert_eq!(second.id, first.id);
    assert_eq!(second.created_at, first.created_at);
    assert!(second.is_read);
}

#[tokio::test]
async fn test_pg_replace_changed_draft_resets_unread() {
    let Some(repos) = postgres().await else {
        return;
    };
    let owner = UserId::new();
    let product = stored_product(&repos, owner, "Kefir").await;
    let near = draft(&product, NotificationKind::NearExpiry, "Kefir will expire in 2 days.");
    let expired = draft(&product, NotificationKind::Expired, "Kefir expired on 2024-03-14.");

    let first = repos
        .notifications
        .replace_for_product(product.id, Some(&near))
        .await
        .expect("replace")
        .expect("notification");
    repos.notifications.mark_read(first.id, owner).await.expect("mark read");

    let second = repos
        .notifications
        .replace_for_product(product.id, Some(&expired))
        .await
        .expect("replace")
        .expect("notification");

    assert_ne!(second.id, first.id);
    assert_eq!(second.kind, NotificationKind::Expired);
    assert!(!second.is_read);

    let listed = repos.notifications.list_notifications(owner).await.expect("list");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);
}

#[tokio::test]
async fn test_pg_replace_with_none_deletes() {
    let Some(repos) = postgres().await else {
        return;
    };
    let product = stored_product(&repos, UserId::new(), "Tofu").await;
    let expired = draft(&product, NotificationKind::Expired, "Tofu expired on 2024-03-14.");
    repos
        .notifications
        .replace_for_product(product.id, Some(&expired))
        .await
        .expect("replace");

    let cleared = repos
        .notifications
        .replace_for_product(product.id, None)
        .await
        .expect("replace");

    assert!(cleared.is_none());
    assert!(
        repos
            .notifications
            .find_for_product(product.id)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn test_pg_duplicate_create_conflicts() {
    let Some(repos) = postgres().await else {
        return;
    };
    let product = stored_product(&repos, UserId::new(), "Miso").await;
    let expired = draft(&product, NotificationKind::Expired, "Miso expired on 2024-03-14.");

    repos
        .notifications
        .create_notification(&expired)
        .await
        .expect("first create");
    let err = repos
        .notifications
        .create_notification(&expired)
        .await
        .expect_err("second create should conflict");

    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn test_pg_product_delete_cascades() {
    let Some(repos) = postgres().await else {
        return;
    };
    let product = stored_product(&repos, UserId::new(), "Ham").await;
    let expired = draft(&product, NotificationKind::Expired, "Ham expired on 2024-03-14.");
    repos
        .notifications
        .replace_for_product(product.id, Some(&expired))
        .await
        .expect("replace");

    assert!(repos.products.delete_product(product.id).await.expect("delete"));

    assert!(
        repos
            .notifications
            .find_for_product(product.id)
            .await
            .expect("find")
            .is_none()
    );
}

#[tokio::test]
async fn test_pg_longest_valid_name_notifies() {
    let Some(repos) = postgres().await else {
        return;
    };
    let engine = Arc::new(NotificationEngine::new(
        repos.products.clone(),
        repos.settings.clone(),
        repos.notifications.clone(),
        Arc::new(FixedClock::new(today())),
    ));
    let products = ProductService::new(repos.products.clone(), Arc::clone(&engine));
    let owner = UserId::new();
    let name = "Q".repeat(200);

    let write = products
        .create(owner, new_product(&name, days_from_today(-1)))
        .await
        .expect("create with a 200-character name");

    let notification = write
        .derivation
        .and_then(|d| d.notification)
        .expect("notification");
    assert_eq!(notification.kind, NotificationKind::Expired);
    assert_eq!(notification.message, format!("{name} expired on 2024-03-14."));
}
