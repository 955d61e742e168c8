//! Database migration management commands.

use clap::{Args, Subcommand};

use crate::output;
use expiry_core::config::AppConfig;
use expiry_core::error::AppError;
use expiry_database::connection::DatabasePool;
use expiry_database::migration;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
    /// Show migration status
    Status,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    let db = DatabasePool::connect(&config.database).await?;

    match &args.command {
        MigrateCommand::Run => {
            println!("Running database migrations...");
            migration::run_migrations(db.pool()).await?;
            output::print_success("All migrations applied successfully.");
        }
        MigrateCommand::Status => {
            if db.health_check().await? {
                output::print_success("Database reachable.");
            }
            let states = migration::migration_status(db.pool()).await?;
            for state in &states {
                let mark = if state.applied { "applied" } else { "pending" };
                println!("  {} - {} ({mark})", state.version, state.description);
            }
            if states.iter().any(|s| !s.applied) {
                output::print_warning("Pending migrations found. Run `expiry-cli migrate run`.");
            }
        }
    }

    db.close().await;
    Ok(())
}
