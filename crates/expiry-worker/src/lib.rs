//! Scheduled work for the expiry tracker.
//!
//! Notifications are normally derived only when a product is written. The
//! sweep job re-derives every product on a cron schedule so notifications
//! follow the calendar even for products nobody touches. It is disabled
//! unless `worker.sweep_enabled` is set.

pub mod executor;
pub mod jobs;
pub mod scheduler;

pub use executor::{JobExecutionError, JobHandler};
pub use jobs::SweepJobHandler;
pub use scheduler::CronScheduler;
