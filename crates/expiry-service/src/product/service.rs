//! Product CRUD. Every write runs the notification engine before it
//! returns, so callers never observe a product whose notification is stale
//! relative to its own data.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use expiry_core::error::AppError;
use expiry_core::events::{DomainEvent, ProductEvent};
use expiry_core::types::{ProductId, UserId};
use expiry_database::store::ProductStore;
use expiry_entity::product::{NewProduct, Product, ProductUpdate};

use crate::notification::{DerivationOutcome, NotificationEngine};
use crate::validation::validate;

/// A product write together with the derivation it triggered.
#[derive(Debug, Clone, Serialize)]
pub struct ProductWrite {
    /// The product as stored.
    pub product: Product,
    /// The derivation run for it. `None` only if the product was deleted
    /// concurrently before the engine could read it back.
    pub derivation: Option<DerivationOutcome>,
}

/// Manages an owner's products.
#[derive(Debug, Clone)]
pub struct ProductService {
    /// Product store.
    products: Arc<dyn ProductStore>,
    /// Notification engine, run after every write.
    engine: Arc<NotificationEngine>,
}

impl ProductService {
    /// Creates a new product service.
    pub fn new(products: Arc<dyn ProductStore>, engine: Arc<NotificationEngine>) -> Self {
        Self { products, engine }
    }

    /// Creates a product and derives its notification.
    pub async fn create(
        &self,
        owner_id: UserId,
        input: NewProduct,
    ) -> Result<ProductWrite, AppError> {
        validate(&input)?;

        let product = Product::from_new(owner_id, input, Utc::now());
        if product.has_inverted_dates() {
            warn!(
                product_id = %product.id,
                mfg_date = %product.mfg_date,
                exp_date = %product.exp_date,
                "Product expires before it was manufactured"
            );
        }

        let product = self.products.insert_product(&product).await?;
        info!(
            product_id = %product.id,
            owner_id = %owner_id,
            name = %product.name,
            "Product created"
        );

        let derivation = self
            .engine
            .handle_event(&DomainEvent::product(
                owner_id,
                ProductEvent::Created {
                    product_id: product.id,
                    owner_id,
                },
            ))
            .await?;

        Ok(ProductWrite { product, derivation })
    }

    /// Applies a partial update and re-derives the product's notification.
    pub async fn update(
        &self,
        owner_id: UserId,
        product_id: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductWrite, AppError> {
        validate(&update)?;

        let mut product = self.get(owner_id, product_id).await?;
        let changed_fields = update.apply(&mut product);
        if product.has_inverted_dates() {
            warn!(product_id = %product.id, "Product expires before it was manufactured");
        }
        if !changed_fields.is_empty() {
            product.updated_at = Utc::now();
        }

        let product = self.products.update_product(&product).await?;
        info!(
            product_id = %product.id,
            owner_id = %owner_id,
            changed = ?changed_fields,
            "Product updated"
        );

        let derivation = self
            .engine
            .handle_event(&DomainEvent::product(
                owner_id,
                ProductEvent::Updated {
                    product_id: product.id,
                    owner_id,
                    changed_fields,
                },
            ))
            .await?;

        Ok(ProductWrite { product, derivation })
    }

    /// Deletes a product. Its notification goes with it.
    pub async fn delete(&self, owner_id: UserId, product_id: ProductId) -> Result<(), AppError> {
        self.get(owner_id, product_id).await?;

        if !self.products.delete_product(product_id).await? {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }
        info!(product_id = %product_id, owner_id = %owner_id, "Product deleted");

        self.engine
            .handle_event(&DomainEvent::product(
                owner_id,
                ProductEvent::Deleted {
                    product_id,
                    owner_id,
                },
            ))
            .await?;
        Ok(())
    }

    /// Gets one of the owner's products.
    pub async fn get(&self, owner_id: UserId, product_id: ProductId) -> Result<Product, AppError> {
        self.products
            .find_product(product_id)
            .await?
            .filter(|p| p.owner_id == owner_id)
            .ok_or_else(|| AppError::not_found(format!("Product {product_id} not found")))
    }

    /// Lists the owner's products, newest first.
    pub async fn list(&self, owner_id: UserId) -> Result<Vec<Product>, AppError> {
        self.products.list_products(owner_id).await
    }
}
