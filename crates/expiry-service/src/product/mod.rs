//! Product writes and reads.

pub mod service;

pub use service::{ProductService, ProductWrite};
