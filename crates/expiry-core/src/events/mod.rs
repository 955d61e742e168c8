//! Domain events emitted by product writes.
//!
//! The product service emits these after every successful write and the
//! notification engine consumes them synchronously before the write returns.

pub mod product;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use product::ProductEvent;

use crate::types::UserId;

/// Wrapper for all domain events with metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    /// Unique event ID.
    pub id: Uuid,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
    /// The user who caused the event (if applicable).
    pub actor_id: Option<UserId>,
    /// The event payload.
    pub payload: EventPayload,
}

/// Union of all domain event types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "domain", content = "event")]
pub enum EventPayload {
    /// A product-related event.
    Product(ProductEvent),
}

impl DomainEvent {
    /// Create a new domain event.
    pub fn new(actor_id: Option<UserId>, payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            actor_id,
            payload,
        }
    }

    /// Shorthand for a product event raised by the product's owner.
    pub fn product(actor_id: UserId, event: ProductEvent) -> Self {
        Self::new(Some(actor_id), EventPayload::Product(event))
    }
}
