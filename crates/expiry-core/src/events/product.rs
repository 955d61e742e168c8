//! Product lifecycle events.

use serde::{Deserialize, Serialize};

use crate::types::{ProductId, UserId};

/// Events related to product writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ProductEvent {
    /// A product was created.
    Created {
        /// The product ID.
        product_id: ProductId,
        /// The owning user.
        owner_id: UserId,
    },
    /// A product was updated.
    Updated {
        /// The product ID.
        product_id: ProductId,
        /// The owning user.
        owner_id: UserId,
        /// Fields that changed.
        changed_fields: Vec<String>,
    },
    /// A product was deleted.
    Deleted {
        /// The product ID.
        product_id: ProductId,
        /// The owning user.
        owner_id: UserId,
    },
}

impl ProductEvent {
    /// The product this event concerns.
    pub fn product_id(&self) -> ProductId {
        match self {
            Self::Created { product_id, .. }
            | Self::Updated { product_id, .. }
            | Self::Deleted { product_id, .. } => *product_id,
        }
    }

    /// The owner of the product this event concerns.
    pub fn owner_id(&self) -> UserId {
        match self {
            Self::Created { owner_id, .. }
            | Self::Updated { owner_id, .. }
            | Self::Deleted { owner_id, .. } => *owner_id,
        }
    }
}
