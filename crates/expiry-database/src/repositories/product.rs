//! Product repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use expiry_core::error::{AppError, ErrorKind};
use expiry_core::result::AppResult;
use expiry_core::types::{ProductId, UserId};
use expiry_entity::product::Product;

use crate::store::ProductStore;

/// Repository for product CRUD operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: PgPool,
}

impl ProductRepository {
    /// Create a new product repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    async fn find_product(&self, id: ProductId) -> AppResult<Option<Product>> {
        sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find product", e))
    }

    async fn list_products(&self, owner_id: UserId) -> AppResult<Vec<Product>> {
        sqlx::query_as::<_, Product>(
            "SELECT * FROM products WHERE owner_id = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list products", e))
    }

    async fn all_product_ids(&self) -> AppResult<Vec<ProductId>> {
        sqlx::query_scalar::<_, ProductId>("SELECT id FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list product ids", e)
            })
    }

    async fn insert_product(&self, product: &Product) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "INSERT INTO products (id, owner_id, name, category, batch_no, barcode, mfg_date, exp_date, quantity, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) RETURNING *",
        )
        .bind(product.id)
        .bind(product.owner_id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.batch_no)
        .bind(&product.barcode)
        .bind(product.mfg_date)
        .bind(product.exp_date)
        .bind(product.quantity)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create product", e))
    }

    async fn update_product(&self, product: &Product) -> AppResult<Product> {
        sqlx::query_as::<_, Product>(
            "UPDATE products SET name = $2, category = $3, batch_no = $4, barcode = $5, \
             mfg_date = $6, exp_date = $7, quantity = $8, updated_at = $9 \
             WHERE id = $1 RETURNING *",
        )
        .bind(product.id)
        .bind(&product.name)
        .bind(&product.category)
        .bind(&product.batch_no)
        .bind(&product.barcode)
        .bind(product.mfg_date)
        .bind(product.exp_date)
        .bind(product.quantity)
        .bind(product.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update product", e))?
        .ok_or_else(|| AppError::not_found(format!("Product {} not found", product.id)))
    }

    async fn delete_product(&self, id: ProductId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete product", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
