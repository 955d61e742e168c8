//! Inventory reporting.

pub mod inventory;

pub use inventory::{InventoryReportService, InventoryStats};
