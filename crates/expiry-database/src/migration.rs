//! Schema migrations embedded from `migrations/`.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use expiry_core::error::{AppError, ErrorKind};

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// One embedded migration and whether the database has it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationState {
    /// Migration version (timestamp prefix).
    pub version: i64,
    /// Human-readable description from the file name.
    pub description: String,
    /// Whether the migration is recorded as applied.
    pub applied: bool,
}

/// Apply every pending migration.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(embedded = MIGRATOR.iter().count(), "Applying schema migrations");

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to run migrations: {e}"),
            e,
        )
    })?;

    info!("Schema is up to date");
    Ok(())
}

/// List embedded migrations with their applied state.
///
/// A database that was never migrated reports everything as pending.
pub async fn migration_status(pool: &PgPool) -> Result<Vec<MigrationState>, AppError> {
    let applied: Vec<i64> = sqlx::query_scalar(
        "SELECT version FROM _sqlx_migrations WHERE success = TRUE ORDER BY version",
    )
    .fetch_all(pool)
    .await
    .or_else(|e| {
        // 42P01: undefined_table
        let never_migrated =
            matches!(&e, sqlx::Error::Database(db) if db.code().as_deref() == Some("42P01"));
        if never_migrated {
            Ok(Vec::new())
        } else {
            Err(AppError::with_source(
                ErrorKind::Database,
                "Failed to read migration history",
                e,
            ))
        }
    })?;

    Ok(MIGRATOR
        .iter()
        .map(|m| MigrationState {
            version: m.version,
            description: m.description.to_string(),
            applied: applied.contains(&m.version),
        })
        .collect())
}
