//! Cron scheduler for periodic sweeps.

use std::sync::Arc;

use tokio_cron_scheduler::{Job as CronJob, JobScheduler};

use expiry_core::config::WorkerConfig;
use expiry_core::error::AppError;

use crate::executor::{JobHandler, run_job};

/// Cron-based scheduler for periodic background tasks
pub struct CronScheduler {
    /// The underlying job scheduler
    scheduler: JobScheduler,
    /// Worker settings
    config: WorkerConfig,
}

impl std::fmt::Debug for CronScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CronScheduler")
            .field("sweep_enabled", &self.config.sweep_enabled)
            .field("sweep_cron", &self.config.sweep_cron)
            .finish()
    }
}

impl CronScheduler {
    /// Create a new cron scheduler
    pub async fn new(config: WorkerConfig) -> Result<Self, AppError> {
        let scheduler = JobScheduler::new()
            .await
            .map_err(|e| AppError::internal(format!("Failed to create scheduler: {e}")))?;

        Ok(Self { scheduler, config })
    }

    /// Register the notification sweep if it is enabled.
    ///
    /// Returns whether a job was registered.
    pub async fn register_sweep(&self, handler: Arc<dyn JobHandler>) -> Result<bool, AppError> {
        if !self.config.sweep_enabled {
            tracing::info!("Notification sweep disabled");
            return Ok(false);
        }
        self.register(&self.config.sweep_cron, handler).await?;
        Ok(true)
    }

    /// Start the scheduler
    pub async fn start(&mut self) -> Result<(), AppError> {
        self.scheduler
            .start()
            .await
            .map_err(|e| AppError::internal(format!("Failed to start scheduler: {e}")))?;

        tracing::info!("Cron scheduler started");
        Ok(())
    }

    /// Shutdown the scheduler
    pub async fn shutdown(&mut self) -> Result<(), AppError> {
        self.scheduler
            .shutdown()
            .await
            .map_err(|e| AppError::internal(format!("Failed to shutdown scheduler: {e}")))?;

        tracing::info!("Cron scheduler shut down");
        Ok(())
    }

    async fn register(&self, schedule: &str, handler: Arc<dyn JobHandler>) -> Result<(), AppError> {
        let job_type = handler.job_type().to_string();
        let job = CronJob::new_async(schedule, move |_uuid, _lock| {
            let handler = Arc::clone(&handler);
            Box::pin(async move {
                // Failures are already logged; the next tick tries again.
                let _ = run_job(handler.as_ref()).await;
            })
        })
        .map_err(|e| {
            AppError::internal(format!("Failed to create {job_type} schedule: {e}"))
        })?;

        self.scheduler
            .add(job)
            .await
            .map_err(|e| AppError::internal(format!("Failed to add {job_type} schedule: {e}")))?;

        tracing::info!(job_type = %job_type, schedule, "Registered scheduled job");
        Ok(())
    }
}
