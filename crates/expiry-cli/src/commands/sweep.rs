//! Manual notification sweep.

use super::App;
use crate::output::{self, OutputFormat};
use expiry_core::error::AppError;

/// Re-derive every stored product once
pub async fn execute(app: &App, format: OutputFormat) -> Result<(), AppError> {
    let report = app.engine.sweep().await?;
    let rows = [
        ("As of", app.engine.today().to_string()),
        ("Processed", report.processed.to_string()),
        ("Expired", report.expired.to_string()),
        ("Near expiry", report.near_expiry.to_string()),
        ("Safe", report.safe.to_string()),
        ("Failed", report.failed.to_string()),
    ];
    output::print_record(&report, &rows, format);

    if report.failed > 0 {
        return Err(AppError::internal(format!(
            "{} product(s) could not be re-derived",
            report.failed
        )));
    }
    Ok(())
}
