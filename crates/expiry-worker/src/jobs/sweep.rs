//! Notification sweep job.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use expiry_core::error::ErrorKind;
use expiry_service::NotificationEngine;

use crate::executor::{JobExecutionError, JobHandler};

/// Re-derives every stored product's notification
#[derive(Debug)]
pub struct SweepJobHandler {
    /// Notification engine
    engine: Arc<NotificationEngine>,
}

impl SweepJobHandler {
    /// Create a new sweep job handler
    pub fn new(engine: Arc<NotificationEngine>) -> Self {
        Self { engine }
    }
}

#[async_trait]
impl JobHandler for SweepJobHandler {
    fn job_type(&self) -> &str {
        "notification_sweep"
    }

    async fn execute(&self) -> Result<Option<Value>, JobExecutionError> {
        let report = self.engine.sweep().await.map_err(|e| match e.kind {
            ErrorKind::Database => {
                JobExecutionError::Transient(format!("Notification sweep failed: {e}"))
            }
            _ => JobExecutionError::Internal(e),
        })?;

        Ok(Some(serde_json::json!({
            "task": self.job_type(),
            "today": self.engine.today().to_string(),
            "processed": report.processed,
            "expired": report.expired,
            "near_expiry": report.near_expiry,
            "safe": report.safe,
            "failed": report.failed,
        })))
    }
}
