//! # expiry-core
//!
//! Core crate for the expiry tracker. Contains configuration schemas,
//! typed identifiers, product lifecycle events, the clock capability,
//! and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod events;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
