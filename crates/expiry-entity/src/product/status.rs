//! Expiry classification of a product.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a product sits relative to its expiry date and the owner's window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiryStatus {
    /// More than `threshold` days remain.
    Safe,
    /// Between zero and `threshold` days remain, inclusive.
    NearExpiry,
    /// The expiry date is in the past.
    Expired,
}

impl ExpiryStatus {
    /// Classify `days_remaining` (expiry date minus today) against a window.
    pub fn classify(days_remaining: i64, threshold_days: i32) -> Self {
        if days_remaining < 0 {
            Self::Expired
        } else if days_remaining <= i64::from(threshold_days) {
            Self::NearExpiry
        } else {
            Self::Safe
        }
    }

    /// Return the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::NearExpiry => "near_expiry",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ExpiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
