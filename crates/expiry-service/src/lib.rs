//! # expiry-service
//!
//! Business logic for the expiry tracker. The notification engine derives
//! each product's single expiry notification; the product, settings, and
//! notification services wrap the stores and keep the engine in the loop
//! on every write.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod notification;
pub mod product;
pub mod report;
pub mod settings;
mod validation;

pub use notification::{
    DerivationOutcome, NotificationEngine, NotificationService, SweepReport,
    derive_notification, resolve_threshold,
};
pub use product::{ProductService, ProductWrite};
pub use report::{InventoryReportService, InventoryStats};
pub use settings::SettingsService;
