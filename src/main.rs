//! Expiry tracker daemon.
//!
//! Loads configuration, prepares the database, and hosts the scheduled
//! notification sweep until it receives Ctrl+C or SIGTERM. Product writes go
//! through the services directly (see `expiry-cli`), so the daemon only
//! matters when `worker.sweep_enabled` is set.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use expiry_core::config::{AppConfig, LogFormat};
use expiry_core::error::AppError;
use expiry_core::traits::SystemClock;
use expiry_database::connection::DatabasePool;
use expiry_service::NotificationEngine;
use expiry_worker::{CronScheduler, SweepJobHandler};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!(error = %e, "Daemon error");
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("EXPIRY_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());
    AppConfig::load(&config_path)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting expiry-tracker v{}", env!("CARGO_PKG_VERSION"));

    // ── Database connection + migrations ─────────────────────────
    let db = if config.database.migrate_on_start {
        DatabasePool::connect_and_migrate(&config.database).await?
    } else {
        DatabasePool::connect(&config.database).await?
    };
    if !db.health_check().await? {
        return Err(AppError::database("Database health check failed"));
    }
    let repos = db.repositories();

    // ── Notification engine ──────────────────────────────────────
    let engine = Arc::new(
        NotificationEngine::new(
            repos.products.clone(),
            repos.settings.clone(),
            repos.notifications.clone(),
            Arc::new(SystemClock),
        )
        .with_default_threshold(config.notification.default_threshold_days),
    );
    tracing::info!(
        default_threshold_days = engine.default_threshold_days(),
        "Notification engine ready"
    );

    // ── Scheduled sweep ──────────────────────────────────────────
    let mut scheduler = CronScheduler::new(config.worker.clone()).await?;
    scheduler
        .register_sweep(Arc::new(SweepJobHandler::new(Arc::clone(&engine))))
        .await?;
    scheduler.start().await?;

    shutdown_signal().await;
    tracing::info!("Shutdown signal received, stopping");

    scheduler.shutdown().await?;
    db.close().await;

    tracing::info!("expiry-tracker shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
