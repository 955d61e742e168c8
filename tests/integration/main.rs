//! Integration tests for the expiry tracker. Most run against the
//! in-memory store with a pinned clock; `postgres_test` needs a database.

mod helpers;

mod derivation_test;
mod failure_test;
mod postgres_test;
mod product_lifecycle_test;
mod settings_test;
mod sweep_test;
