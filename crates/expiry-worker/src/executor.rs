//! Job handler contract and execution wrapper.

use std::time::Instant;

use async_trait::async_trait;
use serde_json::Value;

use expiry_core::error::AppError;

/// Trait for job handler implementations
#[async_trait]
pub trait JobHandler: Send + Sync + std::fmt::Debug {
    /// Get the job type this handler processes
    fn job_type(&self) -> &str;

    /// Execute the job, returning a JSON summary on success
    async fn execute(&self) -> Result<Option<Value>, JobExecutionError>;
}

/// Error from job execution
#[derive(Debug, thiserror::Error)]
pub enum JobExecutionError {
    /// Permanent failure: retrying will not help
    #[error("Permanent job failure: {0}")]
    Permanent(String),

    /// Transient failure: the next scheduled run may succeed
    #[error("Transient job failure: {0}")]
    Transient(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(#[from] AppError),
}

/// Run a handler once and log how it went.
pub async fn run_job(handler: &dyn JobHandler) -> Result<Option<Value>, JobExecutionError> {
    let started = Instant::now();
    tracing::info!(job_type = handler.job_type(), "Executing job");

    let result = handler.execute().await;
    let elapsed_ms = started.elapsed().as_millis() as u64;

    match &result {
        Ok(summary) => tracing::info!(
            job_type = handler.job_type(),
            elapsed_ms,
            summary = ?summary,
            "Job completed"
        ),
        Err(e) => tracing::error!(
            job_type = handler.job_type(),
            elapsed_ms,
            error = %e,
            "Job failed"
        ),
    }
    result
}
