//! Inventory statistics CLI command.

use clap::Args;

use super::App;
use crate::output::{self, OutputFormat};
use expiry_core::error::AppError;
use expiry_core::types::UserId;

/// Arguments for the stats command
#[derive(Debug, Args)]
pub struct StatsArgs {
    /// Owning user
    #[arg(long)]
    pub owner: UserId,
}

/// Execute the stats command
pub async fn execute(args: &StatsArgs, app: &App, format: OutputFormat) -> Result<(), AppError> {
    let stats = app.report.stats(args.owner).await?;
    let as_of = stats.as_of.map(|d| d.to_string()).unwrap_or_default();
    let rows = [
        ("As of", as_of),
        ("Threshold (days)", stats.threshold_days.to_string()),
        ("Total", stats.total.to_string()),
        ("Safe", stats.safe.to_string()),
        ("Near expiry", stats.near_expiry.to_string()),
        ("Expired", stats.expired.to_string()),
    ];
    output::print_record(&stats, &rows, format);
    Ok(())
}
