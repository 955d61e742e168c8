//! Convenience result type alias for the expiry tracker.

use crate::error::AppError;

/// A specialized `Result` type for expiry tracker operations.
pub type AppResult<T> = Result<T, AppError>;
