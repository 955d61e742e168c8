//! CLI command definitions and dispatch.

pub mod migrate;
pub mod notification;
pub mod product;
pub mod settings;
pub mod stats;
pub mod sweep;

use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use expiry_core::config::AppConfig;
use expiry_core::error::AppError;
use expiry_core::traits::{Clock, FixedClock, SystemClock};
use expiry_database::connection::DatabasePool;
use expiry_service::{
    InventoryReportService, NotificationEngine, NotificationService, ProductService,
    SettingsService,
};

/// Expiry tracker: product expiry notifications
#[derive(Debug, Parser)]
#[command(name = "expiry-cli", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Evaluate expiry as of this date (YYYY-MM-DD) instead of today
    #[arg(long, global = true)]
    pub today: Option<NaiveDate>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Product management
    Product(product::ProductArgs),
    /// Notification inbox
    Notification(notification::NotificationArgs),
    /// User settings
    Settings(settings::SettingsArgs),
    /// Inventory statistics
    Stats(stats::StatsArgs),
    /// Re-derive every product's notification
    Sweep,
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let config = load_config(&self.config)?;

        if let Commands::Migrate(args) = &self.command {
            return migrate::execute(args, &config).await;
        }

        let app = App::connect(&config, self.today).await?;
        let result = match &self.command {
            Commands::Migrate(_) => Ok(()),
            Commands::Product(args) => product::execute(args, &app, self.format).await,
            Commands::Notification(args) => notification::execute(args, &app, self.format).await,
            Commands::Settings(args) => settings::execute(args, &app, self.format).await,
            Commands::Stats(args) => stats::execute(args, &app, self.format).await,
            Commands::Sweep => sweep::execute(&app, self.format).await,
        };
        app.db.close().await;
        result
    }
}

/// Services wired over one database pool.
#[derive(Debug)]
pub struct App {
    /// Connection pool, closed when the command finishes.
    pub db: DatabasePool,
    /// Notification engine shared by the services.
    pub engine: Arc<NotificationEngine>,
    /// Product CRUD.
    pub products: ProductService,
    /// Notification inbox.
    pub notifications: NotificationService,
    /// User settings.
    pub settings: SettingsService,
    /// Inventory statistics.
    pub report: InventoryReportService,
}

impl App {
    /// Connect to the database and build every service.
    ///
    /// `today` pins the engine's clock; `None` uses the local calendar.
    pub async fn connect(config: &AppConfig, today: Option<NaiveDate>) -> Result<Self, AppError> {
        let db = DatabasePool::connect(&config.database).await?;
        let repos = db.repositories();

        let clock: Arc<dyn Clock> = match today {
            Some(day) => Arc::new(FixedClock::new(day)),
            None => Arc::new(SystemClock),
        };
        let engine = Arc::new(
            NotificationEngine::new(
                repos.products.clone(),
                repos.settings.clone(),
                repos.notifications.clone(),
                clock,
            )
            .with_default_threshold(config.notification.default_threshold_days),
        );

        Ok(Self {
            products: ProductService::new(repos.products.clone(), Arc::clone(&engine)),
            notifications: NotificationService::new(repos.notifications.clone()),
            settings: SettingsService::new(repos.settings.clone(), Arc::clone(&engine)),
            report: InventoryReportService::new(repos.products, Arc::clone(&engine)),
            engine,
            db,
        })
    }
}

/// Helper: load configuration from file
pub fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    AppConfig::load(config_path)
}
