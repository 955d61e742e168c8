//! Notification derivation rules, the derivation engine, and the
//! read-side notification service.

pub mod engine;
pub mod rules;
pub mod service;

pub use engine::{DerivationOutcome, NotificationEngine, SweepReport};
pub use rules::{derive_notification, effective_threshold, resolve_threshold};
pub use service::NotificationService;
