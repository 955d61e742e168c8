//! The notification engine: keeps each product's single notification in
//! step with the product's current data.
//!
//! Every product create and update must pass through [`NotificationEngine`]
//! before the write is reported as successful. Derivation happens only on
//! those writes (and on an explicit [`NotificationEngine::sweep`]), so a
//! notification untouched across midnight can lag the calendar by a day or
//! more.

use std::sync::Arc;

use dashmap::DashMap;
use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use expiry_core::config::notification::DEFAULT_THRESHOLD_DAYS;
use expiry_core::error::AppError;
use expiry_core::events::{DomainEvent, EventPayload, ProductEvent};
use expiry_core::traits::Clock;
use expiry_core::types::{ProductId, UserId};
use expiry_database::store::{NotificationStore, ProductStore, SettingsStore};
use expiry_entity::notification::Notification;
use expiry_entity::product::{ExpiryStatus, Product};

use super::rules::{derive_notification, effective_threshold};

/// How many products a sweep derives at once.
const SWEEP_CONCURRENCY: usize = 8;

/// The result of deriving one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivationOutcome {
    /// The product that was derived.
    pub product_id: ProductId,
    /// Where the product stands relative to its owner's window.
    pub status: ExpiryStatus,
    /// The threshold the derivation used.
    pub threshold_days: i32,
    /// The product's notification after derivation, if it has one.
    pub notification: Option<Notification>,
}

/// Totals from a sweep over every stored product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SweepReport {
    /// Products derived successfully.
    pub processed: u64,
    /// Of those, how many are now expired.
    pub expired: u64,
    /// Of those, how many are now near expiry.
    pub near_expiry: u64,
    /// Of those, how many carry no notification.
    pub safe: u64,
    /// Products whose derivation failed.
    pub failed: u64,
}

/// Derives and stores product notifications.
#[derive(Debug)]
pub struct NotificationEngine {
    /// Product reads.
    products: Arc<dyn ProductStore>,
    /// Threshold lookups.
    settings: Arc<dyn SettingsStore>,
    /// Notification writes.
    notifications: Arc<dyn NotificationStore>,
    /// Source of "today".
    clock: Arc<dyn Clock>,
    /// Window for owners without a stored threshold.
    default_threshold_days: i32,
    /// One lock per product currently being derived.
    locks: DashMap<ProductId, Arc<Mutex<()>>>,
}

impl NotificationEngine {
    /// Creates a new notification engine with the standard 7-day default.
    pub fn new(
        products: Arc<dyn ProductStore>,
        settings: Arc<dyn SettingsStore>,
        notifications: Arc<dyn NotificationStore>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            products,
            settings,
            notifications,
            clock,
            default_threshold_days: DEFAULT_THRESHOLD_DAYS,
            locks: DashMap::new(),
        }
    }

    /// Override the window used when an owner has no stored threshold.
    /// Non-positive values are ignored.
    pub fn with_default_threshold(mut self, days: i32) -> Self {
        if days > 0 {
            self.default_threshold_days = days;
        }
        self
    }

    /// The window used for owners without settings.
    pub fn default_threshold_days(&self) -> i32 {
        self.default_threshold_days
    }

    /// The current calendar day according to the injected clock.
    pub fn today(&self) -> chrono::NaiveDate {
        self.clock.today()
    }

    /// The owner's effective threshold.
    ///
    /// A failed lookup is logged and treated like a missing record.
    pub async fn threshold_for(&self, owner_id: UserId) -> i32 {
        let stored = match self.settings.find_threshold(owner_id).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(
                    owner_id = %owner_id,
                    error = %e,
                    "Threshold lookup failed, using default"
                );
                None
            }
        };
        effective_threshold(stored, self.default_threshold_days)
    }

    /// Hook for a freshly created product.
    pub async fn on_product_created(
        &self,
        product: &Product,
    ) -> Result<DerivationOutcome, AppError> {
        self.derive(product).await
    }

    /// Hook for an updated product.
    ///
    /// For callers that persist the product themselves and hand over the
    /// row they wrote. `ProductService` goes through [`Self::handle_event`]
    /// instead, which re-reads the product under its lock.
    pub async fn on_product_updated(
        &self,
        product: &Product,
    ) -> Result<DerivationOutcome, AppError> {
        self.derive(product).await
    }

    /// Hook for a deleted product. Returns the number of notifications removed.
    pub async fn on_product_deleted(&self, product_id: ProductId) -> Result<u64, AppError> {
        let lock = self.lock_for(product_id);
        let removed = {
            let _guard = lock.lock().await;
            self.notifications.delete_for_product(product_id).await?
        };
        self.release_lock(product_id, lock);

        debug!(product_id = %product_id, removed, "Cleared notifications for deleted product");
        Ok(removed)
    }

    /// React to a product lifecycle event.
    ///
    /// Created and updated events re-read the product from the store so the
    /// derivation always sees committed data.
    pub async fn handle_event(
        &self,
        event: &DomainEvent,
    ) -> Result<Option<DerivationOutcome>, AppError> {
        let EventPayload::Product(product_event) = &event.payload;
        match product_event {
            ProductEvent::Created { product_id, .. } | ProductEvent::Updated { product_id, .. } => {
                self.rederive(*product_id).await
            }
            ProductEvent::Deleted { product_id, .. } => {
                self.on_product_deleted(*product_id).await?;
                Ok(None)
            }
        }
    }

    /// Load a product and derive it. A product that no longer exists has
    /// its notifications cleared and yields `None`.
    ///
    /// The product is read while holding its lock, so the last derivation
    /// to run always sees the latest committed product.
    pub async fn rederive(
        &self,
        product_id: ProductId,
    ) -> Result<Option<DerivationOutcome>, AppError> {
        let lock = self.lock_for(product_id);
        let result = {
            let _guard = lock.lock().await;
            match self.products.find_product(product_id).await {
                Ok(Some(product)) => self.derive_locked(&product).await.map(Some),
                Ok(None) => self
                    .notifications
                    .delete_for_product(product_id)
                    .await
                    .map(|_| None),
                Err(e) => Err(e),
            }
        };
        self.release_lock(product_id, lock);
        result
    }

    /// Derive every product an owner holds, e.g. after their threshold
    /// changed.
    pub async fn rederive_owner(
        &self,
        owner_id: UserId,
    ) -> Result<Vec<DerivationOutcome>, AppError> {
        let products = self.products.list_products(owner_id).await?;
        let mut outcomes = Vec::with_capacity(products.len());
        for product in &products {
            if let Some(outcome) = self.rederive(product.id).await? {
                outcomes.push(outcome);
            }
        }
        info!(owner_id = %owner_id, count = outcomes.len(), "Re-derived owner's products");
        Ok(outcomes)
    }

    /// Re-derive every stored product.
    ///
    /// Failures are counted and logged; one bad product does not stop the
    /// sweep.
    pub async fn sweep(&self) -> Result<SweepReport, AppError> {
        let ids = self.products.all_product_ids().await?;
        info!(count = ids.len(), today = %self.today(), "Starting notification sweep");

        let results: Vec<(ProductId, Result<Option<DerivationOutcome>, AppError>)> =
            stream::iter(ids)
                .map(|id| async move { (id, self.rederive(id).await) })
                .buffer_unordered(SWEEP_CONCURRENCY)
                .collect()
                .await;

        let mut report = SweepReport::default();
        for (product_id, result) in results {
            match result {
                Ok(Some(outcome)) => {
                    report.processed += 1;
                    match outcome.status {
                        ExpiryStatus::Expired => report.expired += 1,
                        ExpiryStatus::NearExpiry => report.near_expiry += 1,
                        ExpiryStatus::Safe => report.safe += 1,
                    }
                }
                // Deleted between listing and deriving.
                Ok(None) => {}
                Err(e) => {
                    warn!(product_id = %product_id, error = %e, "Sweep failed for product");
                    report.failed += 1;
                }
            }
        }

        info!(
            processed = report.processed,
            expired = report.expired,
            near_expiry = report.near_expiry,
            failed = report.failed,
            "Notification sweep finished"
        );
        Ok(report)
    }

    /// Derive `product` and replace its stored notification.
    async fn derive(&self, product: &Product) -> Result<DerivationOutcome, AppError> {
        let lock = self.lock_for(product.id);
        let result = {
            let _guard = lock.lock().await;
            self.derive_locked(product).await
        };
        self.release_lock(product.id, lock);
        result
    }

    async fn derive_locked(&self, product: &Product) -> Result<DerivationOutcome, AppError> {
        let today = self.clock.today();
        let threshold_days = self.threshold_for(product.owner_id).await;
        let draft = derive_notification(product, threshold_days, today);

        let notification = self
            .notifications
            .replace_for_product(product.id, draft.as_ref())
            .await?;

        let status = product.status(today, threshold_days);
        debug!(
            product_id = %product.id,
            owner_id = %product.owner_id,
            status = %status,
            threshold_days,
            %today,
            "Derived product notification"
        );

        Ok(DerivationOutcome {
            product_id: product.id,
            status,
            threshold_days,
            notification,
        })
    }

    fn lock_for(&self, product_id: ProductId) -> Arc<Mutex<()>> {
        self.locks
            .entry(product_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }

    /// Drop the map entry once no other task is waiting on it.
    fn release_lock(&self, product_id: ProductId, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.locks
            .remove_if(&product_id, |_, l| Arc::strong_count(l) == 1);
    }
}
