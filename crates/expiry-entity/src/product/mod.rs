//! Product domain entities.

pub mod model;
pub mod status;

pub use model::{NewProduct, Product, ProductUpdate};
pub use status::ExpiryStatus;
