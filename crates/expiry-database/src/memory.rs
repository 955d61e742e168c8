//! In-memory store using a Tokio `RwLock` for single-process deployments
//! and tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use expiry_core::error::AppError;
use expiry_core::result::AppResult;
use expiry_core::types::{NotificationId, ProductId, UserId};
use expiry_entity::notification::{Notification, NotificationDraft};
use expiry_entity::product::Product;
use expiry_entity::settings::UserSettings;

use crate::store::{NotificationStore, ProductStore, SettingsStore};

/// Internal state. Notifications are keyed by product, which makes a second
/// notification for the same product unrepresentable.
#[derive(Debug, Default)]
struct InnerState {
    products: HashMap<ProductId, Product>,
    settings: HashMap<UserId, UserSettings>,
    notifications: HashMap<ProductId, Notification>,
}

/// In-memory implementation of every store trait.
///
/// Cloning shares the underlying state.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<InnerState>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored notifications, across all owners.
    pub async fn notification_count(&self) -> usize {
        self.state.read().await.notifications.len()
    }
}

fn newest_first<T>(items: &mut [T], key: impl Fn(&T) -> (chrono::DateTime<Utc>, uuid::Uuid)) {
    items.sort_by(|a, b| key(b).cmp(&key(a)));
}

#[async_trait]
impl ProductStore for MemoryStore {
    async fn find_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        Ok(self.state.read().await.products.get(&id).cloned())
    }

    async fn list_products(&self, owner_id: UserId) -> AppResult<Vec<Product>> {
        let state = self.state.read().await;
        let mut products: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut products, |p| (p.created_at, p.id.into_uuid()));
        Ok(products)
    }

    async fn all_product_ids(&self) -> AppResult<Vec<ProductId>> {
        let mut ids: Vec<ProductId> = self.state.read().await.products.keys().copied().collect();
        ids.sort();
        Ok(ids)
    }

    async fn insert_product(&self, product: &Product) -> AppResult<Product> {
        let mut state = self.state.write().await;
        if state.products.contains_key(&product.id) {
            return Err(AppError::conflict(format!(
                "Product {} already exists",
                product.id
            )));
        }
        state.products.insert(product.id, product.clone());
        Ok(product.clone())
    }

    async fn update_product(&self, product: &Product) -> AppResult<Product> {
        let mut state = self.state.write().await;
        match state.products.get_mut(&product.id) {
            Some(stored) => {
                *stored = product.clone();
                Ok(product.clone())
            }
            None => Err(AppError::not_found(format!(
                "Product {} not found",
                product.id
            ))),
        }
    }

    async fn delete_product(&self, id: ProductId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let removed = state.products.remove(&id).is_some();
        if removed && state.notifications.remove(&id).is_some() {
            debug!(product_id = %id, "Cascaded notification delete");
        }
        Ok(removed)
    }
}

#[async_trait]
impl SettingsStore for MemoryStore {
    async fn find_settings(&self, owner_id: UserId) -> AppResult<Option<UserSettings>> {
        Ok(self.state.read().await.settings.get(&owner_id).cloned())
    }

    async fn upsert_settings(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        self.state
            .write()
            .await
            .settings
            .insert(settings.owner_id, settings.clone());
        Ok(settings.clone())
    }
}

#[async_trait]
impl NotificationStore for MemoryStore {
    async fn find_for_product(&self, product_id: ProductId) -> AppResult<Option<Notification>> {
        Ok(self
            .state
            .read()
            .await
            .notifications
            .get(&product_id)
            .cloned())
    }

    async fn list_notifications(&self, owner_id: UserId) -> AppResult<Vec<Notification>> {
        let state = self.state.read().await;
        let mut notifications: Vec<Notification> = state
            .notifications
            .values()
            .filter(|n| n.owner_id == owner_id)
            .cloned()
            .collect();
        newest_first(&mut notifications, |n| (n.created_at, n.id.into_uuid()));
        Ok(notifications)
    }

    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64> {
        let removed = self
            .state
            .write()
            .await
            .notifications
            .remove(&product_id)
            .is_some();
        Ok(u64::from(removed))
    }

    async fn create_notification(&self, draft: &NotificationDraft) -> AppResult<Notification> {
        let mut state = self.state.write().await;
        if state.notifications.contains_key(&draft.product_id) {
            return Err(AppError::conflict(format!(
                "Product {} already has a notification",
                draft.product_id
            )));
        }
        let notification = Notification::from_draft(draft, Utc::now());
        state
            .notifications
            .insert(draft.product_id, notification.clone());
        Ok(notification)
    }

    async fn replace_for_product(
        &self,
        product_id: ProductId,
        draft: Option<&NotificationDraft>,
    ) -> AppResult<Option<Notification>> {
        let mut state = self.state.write().await;
        let Some(draft) = draft else {
            state.notifications.remove(&product_id);
            return Ok(None);
        };

        if let Some(existing) = state.notifications.get(&product_id) {
            if existing.matches(draft) {
                return Ok(Some(existing.clone()));
            }
        }

        let notification = Notification::from_draft(draft, Utc::now());
        state.notifications.insert(product_id, notification.clone());
        Ok(Some(notification))
    }

    async fn count_unread(&self, owner_id: UserId) -> AppResult<u64> {
        let state = self.state.read().await;
        Ok(state
            .notifications
            .values()
            .filter(|n| n.owner_id == owner_id && n.is_unread())
            .count() as u64)
    }

    async fn mark_read(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        match state
            .notifications
            .values_mut()
            .find(|n| n.id == id && n.owner_id == owner_id)
        {
            Some(notification) => {
                notification.is_read = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_all_read(&self, owner_id: UserId) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let mut changed = 0;
        for notification in state
            .notifications
            .values_mut()
            .filter(|n| n.owner_id == owner_id && n.is_unread())
        {
            notification.is_read = true;
            changed += 1;
        }
        Ok(changed)
    }

    async fn delete_notification(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let before = state.notifications.len();
        state
            .notifications
            .retain(|_, n| !(n.id == id && n.owner_id == owner_id));
        Ok(state.notifications.len() < before)
    }
}
