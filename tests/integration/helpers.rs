//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};

use expiry_core::config::DatabaseConfig;
use expiry_core::error::{AppError, ErrorKind};
use expiry_core::result::AppResult;
use expiry_core::traits::FixedClock;
use expiry_core::types::{NotificationId, ProductId, UserId};
use expiry_database::MemoryStore;
use expiry_database::connection::DatabasePool;
use expiry_database::repositories::Repositories;
use expiry_database::store::{NotificationStore, ProductStore, SettingsStore};
use expiry_entity::notification::{Notification, NotificationDraft};
use expiry_entity::product::{NewProduct, Product};
use expiry_entity::settings::{SettingsUpdate, UserSettings};
use expiry_service::{
    InventoryReportService, NotificationEngine, NotificationService, ProductService,
    SettingsService,
};

/// The fixed "today" every test starts from.
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).expect("valid date")
}

/// `today()` shifted by `days`.
pub fn days_from_today(days: i64) -> NaiveDate {
    today() + Duration::days(days)
}

/// Product input expiring on `exp_date`.
pub fn new_product(name: &str, exp_date: NaiveDate) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        category: "Grocery".to_string(),
        batch_no: "LOT-1".to_string(),
        barcode: None,
        mfg_date: days_from_today(-60),
        exp_date,
        quantity: 10,
    }
}

/// Connect to the test database named by `EXPIRY_TEST_DATABASE_URL` (or
/// `DATABASE_URL`) and apply migrations.
///
/// Returns `None` when neither is set, so PostgreSQL tests are skipped on
/// machines without a database. Tests use fresh ids and never clean up
/// each other's rows.
pub async fn postgres() -> Option<Repositories> {
    let url = std::env::var("EXPIRY_TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()?;
    let config = DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 0,
        connect_timeout_seconds: 10,
        idle_timeout_seconds: 60,
        migrate_on_start: true,
    };
    let db = DatabasePool::connect_and_migrate(&config)
        .await
        .expect("Failed to prepare test database");
    Some(db.repositories())
}

/// Test application context over an in-memory store and a fixed clock.
pub struct TestApp {
    /// Shared store, for direct inspection
    pub store: Arc<FlakyStore>,
    /// Clock driving the engine
    pub clock: Arc<FixedClock>,
    /// Notification engine
    pub engine: Arc<NotificationEngine>,
    /// Product service
    pub products: ProductService,
    /// Notification service
    pub notifications: NotificationService,
    /// Settings service
    pub settings: SettingsService,
    /// Inventory report service
    pub report: InventoryReportService,
}

impl TestApp {
    /// Create a new test application
    pub fn new() -> Self {
        let store = Arc::new(FlakyStore::default());
        let clock = Arc::new(FixedClock::new(today()));
        let engine = Arc::new(NotificationEngine::new(
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ));

        Self {
            products: ProductService::new(store.clone(), Arc::clone(&engine)),
            notifications: NotificationService::new(store.clone()),
            settings: SettingsService::new(store.clone(), Arc::clone(&engine)),
            report: InventoryReportService::new(store.clone(), Arc::clone(&engine)),
            store,
            clock,
            engine,
        }
    }

    /// Create a product for `owner` and return it.
    pub async fn create(&self, owner: UserId, name: &str, exp_date: NaiveDate) -> Product {
        self.products
            .create(owner, new_product(name, exp_date))
            .await
            .expect("Failed to create product")
            .product
    }

    /// Store a threshold for `owner`.
    pub async fn set_threshold(&self, owner: UserId, days: i32) {
        self.settings
            .update(
                owner,
                SettingsUpdate {
                    notify_days_before: Some(days),
                    ..Default::default()
                },
            )
            .await
            .expect("Failed to update settings");
    }

    /// Every notification currently attached to `product_id`.
    pub async fn notifications_for(
        &self,
        owner: UserId,
        product_id: ProductId,
    ) -> Vec<Notification> {
        self.notifications
            .list(owner)
            .await
            .expect("Failed to list notifications")
            .into_iter()
            .filter(|n| n.product_id == product_id)
            .collect()
    }
}

/// A [`MemoryStore`] whose notification writes or threshold reads can be
/// made to fail.
#[derive(Debug, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_notification_writes: AtomicBool,
    fail_settings_reads: AtomicBool,
}

impl FlakyStore {
    /// Make notification deletes and replaces fail.
    pub fn fail_notification_writes(&self, fail: bool) {
        self.fail_notification_writes.store(fail, Ordering::SeqCst);
    }

    /// Make settings lookups fail.
    pub fn fail_settings_reads(&self, fail: bool) {
        self.fail_settings_reads.store(fail, Ordering::SeqCst);
    }

    /// Total number of stored notifications, across all owners.
    pub async fn notification_count(&self) -> usize {
        self.inner.notification_count().await
    }

    fn check_notification_write(&self) -> AppResult<()> {
        if self.fail_notification_writes.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorKind::Database, "notification store unavailable"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProductStore for FlakyStore {
    async fn find_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        self.inner.find_product(id).await
    }

    async fn list_products(&self, owner_id: UserId) -> AppResult<Vec<Product>> {
        self.inner.list_products(owner_id).await
    }

    async fn all_product_ids(&self) -> AppResult<Vec<ProductId>> {
        self.inner.all_product_ids().await
    }

    async fn insert_product(&self, product: &Product) -> AppResult<Product> {
        self.inner.insert_product(product).await
    }

    async fn update_product(&self, product: &Product) -> AppResult<Product> {
        self.inner.update_product(product).await
    }

    async fn delete_product(&self, id: ProductId) -> AppResult<bool> {
        self.inner.delete_product(id).await
    }
}

#[async_trait]
impl SettingsStore for FlakyStore {
    async fn find_settings(&self, owner_id: UserId) -> AppResult<Option<UserSettings>> {
        if self.fail_settings_reads.load(Ordering::SeqCst) {
            return Err(AppError::new(ErrorKind::Database, "settings store unavailable"));
        }
        self.inner.find_settings(owner_id).await
    }

    async fn upsert_settings(&self, settings: &UserSettings) -> AppResult<UserSettings> {
        self.inner.upsert_settings(settings).await
    }
}

#[async_trait]
impl NotificationStore for FlakyStore {
    async fn find_for_product(&self, product_id: ProductId) -> AppResult<Option<Notification>> {
        self.inner.find_for_product(product_id).await
    }

    async fn list_notifications(&self, owner_id: UserId) -> AppResult<Vec<Notification>> {
        self.inner.list_notifications(owner_id).await
    }

    async fn delete_for_product(&self, product_id: ProductId) -> AppResult<u64> {
        self.check_notification_write()?;
        self.inner.delete_for_product(product_id).await
    }

    async fn create_notification(&self, draft: &NotificationDraft) -> AppResult<Notification> {
        self.check_notification_write()?;
        self.inner.create_notification(draft).await
    }

    async fn replace_for_product(
        &self,
        product_id: ProductId,
        draft: Option<&NotificationDraft>,
    ) -> AppResult<Option<Notification>> {
        self.check_notification_write()?;
        self.inner.replace_for_product(product_id, draft).await
    }

    async fn count_unread(&self, owner_id: UserId) -> AppResult<u64> {
        self.inner.count_unread(owner_id).await
    }

    async fn mark_read(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        self.inner.mark_read(id, owner_id).await
    }

    async fn mark_all_read(&self, owner_id: UserId) -> AppResult<u64> {
        self.inner.mark_all_read(owner_id).await
    }

    async fn delete_notification(&self, id: NotificationId, owner_id: UserId) -> AppResult<bool> {
        self.inner.delete_notification(id, owner_id).await
    }
}
