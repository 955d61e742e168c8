//! Built-in job handler implementations.

pub mod sweep;

pub use sweep::SweepJobHandler;
