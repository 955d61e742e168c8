//! Persistence contracts consumed by the notification engine and services.
//!
//! Each trait is implemented twice: by the PostgreSQL repositories in
//! [`crate::repositories`] and by [`crate::memory::MemoryStore`].

use async_trait::async_trait;

use expiry_core::result::AppResult;
use expiry_core::types::{NotificationId, ProductId, UserId};
use expiry_entity::notification::{Notification, NotificationDraft};
use expiry_entity::product::Product;
use expiry_entity::settings::UserSettings;

/// Product records.
#[async_trait]
pub trait ProductStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a product by ID.
    async fn find_product(&self, id: ProductId) -> AppResult<Option<Product>>;

    /// List an owner's products, newest first.
    async fn list_products(&self, owner_id: UserId) -> AppResult<Vec<Product>>;

    /// IDs of every stored product, for sweeps.
    async fn all_product_ids(&self) -> AppResult<Vec<ProductId>>;

    /// Insert a new product.
    async fn insert_product(&self, product: &Product) -> AppResult<Product>;

    /// Overwrite an existing product. Fails with not-found if it is gone.
    async fn update_product(&self, product: &Product) -> AppResult<Product>;

    /// Delete a product and, by cascade, its notification.
    /// Returns `true` if a row was removed.
    async fn delete_product(&self, id: ProductId) -> AppResult<bool>;
}

/// Per-user settings.
#[async_trait]
pub trait SettingsStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find a user's settings record.
    async fn find_settings(&self, owner_id: UserId) -> AppResult<Option<UserSettings>>;

    /// Insert or replace a user's settings record.
    async fn upsert_settings(&self, settings: &UserSettings) -> AppResult<UserSettings>;

    /// The stored near-expiry window, if the user has one.
    async fn find_threshold(&self, owner_id: UserId) -> AppResult<Option<i32>> {
        Ok(self
            .find_settings(owner_id)
            .await?
            .and_then(|s| s.notify_days_before))
    }
}

/// Derived notifications. At most one exists per product.
#[async_trait]
pub trait NotificationStore: Send + Sync + std::fmt::Debug + 'static {
    /// The notification currently attached to a product.
    async fn find_for_product(&self, product_id: ProductId) -> AppResult<Option<Notification>>;

    /// List an owner's notifications, newest first.
    async fn list_notifications(&self, owner_id: UserId) -> AppResult<Vec<Notification>>;

    /// Delete every notification for a product. Returns the number removed.
    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64>;

    /// Store a new notification. Fails with a conflict if the product
    /// already has one.
    async fn create_notification(&self, draft: &NotificationDraft) -> AppResult<Notification>;

    /// Atomically make `draft` the product's only notification, or remove
    /// the notification when `draft` is `None`.
    ///
    /// A stored notification that already matches the draft (same owner,
    /// kind and message) is kept as-is: its id, `created_at` and read flag
    /// survive. Anything else is replaced by a fresh unread row. This is an
    /// upsert keyed by product, not a delete-then-insert, so re-deriving an
    /// unchanged product never resurfaces a notification the owner has read.
    async fn replace_for_product(
        &self,
        product_id: ProductId,
        draft: Option<&NotificationDraft>,
    ) -> AppResult<Option<Notification>>;

    /// Count an owner's unread notifications.
    async fn count_unread(&self, owner_id: UserId) -> AppResult<u64>;

    /// Mark one notification read. Returns `false` if the owner has no such
    /// notification.
    async fn mark_read(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool>;

    /// Mark all of an owner's notifications read. Returns the number changed.
    async fn mark_all_read(&self, owner_id: UserId) -> AppResult<u64>;

    /// Delete one notification. Returns `false` if the owner has no such
    /// notification.
    async fn delete_notification(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool>;
}
