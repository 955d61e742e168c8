//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod database;
pub mod logging;
pub mod notification;
pub mod worker;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::{LogFormat, LoggingConfig};
pub use self::notification::NotificationConfig;
pub use self::worker::WorkerConfig;

use crate::error::AppError;

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (base file + environment overlay + `EXPIRY__*`
/// environment variables).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    pub database: DatabaseConfig,
    /// Notification derivation settings.
    #[serde(default)]
    pub notification: NotificationConfig,
    /// Background worker settings.
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// `path` is the base file (extension optional). When `EXPIRY_ENV` is set,
    /// `config/{env}.toml` is layered on top. Environment variables prefixed
    /// with `EXPIRY__` win over both, e.g. `EXPIRY__DATABASE__URL`.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let mut builder =
            config::Config::builder().add_source(config::File::with_name(path).required(false));

        if let Ok(env) = std::env::var("EXPIRY_ENV") {
            builder = builder
                .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("EXPIRY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let app: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        app.validate()?;
        Ok(app)
    }

    /// Reject settings that would make the engine or the pool misbehave.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::configuration("database.url must not be empty"));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(AppError::configuration(
                "database.min_connections must not exceed database.max_connections",
            ));
        }
        if self.notification.default_threshold_days <= 0 {
            return Err(AppError::configuration(
                "notification.default_threshold_days must be positive",
            ));
        }
        if self.worker.sweep_enabled && self.worker.sweep_cron.trim().is_empty() {
            return Err(AppError::configuration(
                "worker.sweep_cron is required when the sweep is enabled",
            ));
        }
        Ok(())
    }
}
