//! # expiry-entity
//!
//! Domain entity models for the expiry tracker. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities derive `sqlx::FromRow`.

pub mod notification;
pub mod product;
pub mod settings;
