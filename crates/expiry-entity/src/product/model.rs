//! Product entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use expiry_core::types::{ProductId, UserId};

use super::status::ExpiryStatus;

/// A tracked inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// The owning user.
    pub owner_id: UserId,
    /// Display name, used in notification messages.
    pub name: String,
    /// Free-form category.
    pub category: String,
    /// Batch or lot number.
    pub batch_no: String,
    /// Barcode, if one was scanned or entered.
    pub barcode: Option<String>,
    /// Manufacture date.
    pub mfg_date: NaiveDate,
    /// Expiry date.
    pub exp_date: NaiveDate,
    /// Units on hand.
    pub quantity: i32,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last modified.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new product row for `owner_id` from validated input.
    pub fn from_new(owner_id: UserId, input: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            owner_id,
            name: input.name,
            category: input.category,
            batch_no: input.batch_no,
            barcode: input.barcode,
            mfg_date: input.mfg_date,
            exp_date: input.exp_date,
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whole calendar days from `today` until expiry. Negative once expired.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        (self.exp_date - today).num_days()
    }

    /// Classify this product against `today` and a near-expiry window.
    pub fn status(&self, today: NaiveDate, threshold_days: i32) -> ExpiryStatus {
        ExpiryStatus::classify(self.days_until_expiry(today), threshold_days)
    }

    /// Whether the expiry date precedes the manufacture date.
    ///
    /// Accepted on write; callers may surface it as a warning.
    pub fn has_inverted_dates(&self) -> bool {
        self.exp_date < self.mfg_date
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    /// Display name.
    #[validate(length(min = 1, max = 200, message = "Product name is required"))]
    pub name: String,
    /// Category.
    #[validate(length(max = 100))]
    #[serde(default)]
    pub category: String,
    /// Batch number.
    #[validate(length(min = 1, max = 50, message = "Batch number is required"))]
    pub batch_no: String,
    /// Barcode.
    #[validate(length(max = 50))]
    #[serde(default)]
    pub barcode: Option<String>,
    /// Manufacture date.
    pub mfg_date: NaiveDate,
    /// Expiry date.
    pub exp_date: NaiveDate,
    /// Units on hand.
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

/// Partial update for a product. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ProductUpdate {
    /// New display name.
    #[validate(length(min = 1, max = 200, message = "Product name must not be empty"))]
    pub name: Option<String>,
    /// New category.
    #[validate(length(max = 100))]
    pub category: Option<String>,
    /// New batch number.
    #[validate(length(min = 1, max = 50))]
    pub batch_no: Option<String>,
    /// New barcode.
    #[validate(length(max = 50))]
    pub barcode: Option<String>,
    /// New manufacture date.
    pub mfg_date: Option<NaiveDate>,
    /// New expiry date.
    pub exp_date: Option<NaiveDate>,
    /// New quantity.
    #[validate(range(min = 0, message = "Quantity must not be negative"))]
    pub quantity: Option<i32>,
}

impl ProductUpdate {
    /// Apply the update to `product` and return the names of fields whose
    /// value actually changed.
    pub fn apply(self, product: &mut Product) -> Vec<String> {
        let Self {
            name,
            category,
            batch_no,
            barcode,
            mfg_date,
            exp_date,
            quantity,
        } = self;
        let mut changed = Vec::new();

        macro_rules! set {
            ($field:ident) => {
                if let Some(value) = $field {
                    if product.$field != value {
                        product.$field = value;
                        changed.push(stringify!($field).to_string());
                    }
                }
            };
        }

        set!(name);
        set!(category);
        set!(batch_no);
        set!(mfg_date);
        set!(exp_date);
        set!(quantity);

        if let Some(barcode) = barcode {
            let barcode = Some(barcode).filter(|b| !b.is_empty());
            if product.barcode != barcode {
                product.barcode = barcode;
                changed.push("barcode".to_string());
            }
        }

        changed
    }
}

fn default_quantity() -> i32 {
    1
}
