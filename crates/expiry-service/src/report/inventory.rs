//! Inventory statistics per owner.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use expiry_core::error::AppError;
use expiry_core::types::UserId;
use expiry_database::store::ProductStore;
use expiry_entity::product::ExpiryStatus;

use crate::notification::NotificationEngine;

/// Counts of an owner's products by expiry status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryStats {
    /// The day the counts were taken for.
    pub as_of: Option<NaiveDate>,
    /// The window used.
    pub threshold_days: i32,
    /// All products.
    pub total: u64,
    /// Outside the window.
    pub safe: u64,
    /// Inside the window.
    pub near_expiry: u64,
    /// Past their expiry date.
    pub expired: u64,
}

/// Computes inventory statistics.
#[derive(Debug, Clone)]
pub struct InventoryReportService {
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Supplies "today" and the owner's threshold.
    engine: Arc<NotificationEngine>,
}

impl InventoryReportService {
    /// Creates a new report service.
    pub fn new(products: Arc<dyn ProductStore>, engine: Arc<NotificationEngine>) -> Self {
        Self { products, engine }
    }

    /// Classify every product the owner holds as of today.
    pub async fn stats(&self, owner_id: UserId) -> Result<InventoryStats, AppError> {
        let today = self.engine.today();
        let threshold_days = self.engine.threshold_for(owner_id).await;
        let products = self.products.list_products(owner_id).await?;

        let mut stats = InventoryStats {
            as_of: Some(today),
            threshold_days,
            ..Default::default()
        };
        for product in &products {
            stats.total += 1;
            match product.status(today, threshold_days) {
                ExpiryStatus::Safe => stats.safe += 1,
                ExpiryStatus::NearExpiry => stats.near_expiry += 1,
                ExpiryStatus::Expired => stats.expired += 1,
            }
        }
        Ok(stats)
    }
}
