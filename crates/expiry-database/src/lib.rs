//! # expiry-database
//!
//! Persistence for the expiry tracker: the store traits the notification
//! engine depends on, PostgreSQL repositories implementing them, and an
//! in-memory store for single-process use and tests.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryStore;
pub use store::{NotificationStore, ProductStore, SettingsStore};
