//! PostgreSQL repository implementations for all expiry tracker entities.

pub mod notification;
pub mod product;
pub mod settings;

pub use notification::NotificationRepository;
pub use product::ProductRepository;
pub use settings::SettingsRepository;

use std::sync::Arc;

use sqlx::PgPool;

/// The three repositories sharing one pool.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Product rows.
    pub products: Arc<ProductRepository>,
    /// Settings rows.
    pub settings: Arc<SettingsRepository>,
    /// Notification rows.
    pub notifications: Arc<NotificationRepository>,
}

impl Repositories {
    /// Create all repositories over `pool`.
    pub fn new(pool: PgPool) -> Self {
        Self {
            products: Arc::new(ProductRepository::new(pool.clone())),
            settings: Arc::new(SettingsRepository::new(pool.clone())),
            notifications: Arc::new(NotificationRepository::new(pool)),
        }
    }
}
