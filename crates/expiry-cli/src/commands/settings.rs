//! User settings CLI commands.

use clap::{Args, Subcommand};

use super::App;
use crate::output::{self, OutputFormat};
use expiry_core::error::AppError;
use expiry_core::types::UserId;
use expiry_entity::settings::{SettingsUpdate, UserSettings};

/// Arguments for settings commands
#[derive(Debug, Args)]
pub struct SettingsArgs {
    /// Owning user
    #[arg(long)]
    pub owner: UserId,

    /// Settings subcommand
    #[command(subcommand)]
    pub command: SettingsCommand,
}

/// Settings subcommands
#[derive(Debug, Subcommand)]
pub enum SettingsCommand {
    /// Show current settings
    Show,
    /// Change settings; changing the threshold re-derives every product
    Set {
        /// UI theme (light or dark)
        #[arg(long)]
        theme: Option<String>,
        /// UI language code
        #[arg(long)]
        language: Option<String>,
        /// Near-expiry window in days (1-365)
        #[arg(long)]
        notify_days_before: Option<i32>,
    },
}

/// Execute settings commands
pub async fn execute(args: &SettingsArgs, app: &App, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        SettingsCommand::Show => {
            let settings = app.settings.get(args.owner).await?;
            print_settings(&settings, format);
        }
        SettingsCommand::Set {
            theme,
            language,
            notify_days_before,
        } => {
            let update = SettingsUpdate {
                theme: theme.clone(),
                language: language.clone(),
                notify_days_before: *notify_days_before,
            };
            let settings = app.settings.update(args.owner, update).await?;
            if format == OutputFormat::Table {
                output::print_success("Settings saved");
            }
            print_settings(&settings, format);
        }
    }

    Ok(())
}

fn print_settings(settings: &UserSettings, format: OutputFormat) {
    let threshold = settings
        .notify_days_before
        .map(|d| d.to_string())
        .unwrap_or_else(|| "default".to_string());
    let rows = [
        ("Theme", settings.theme.clone()),
        ("Language", settings.language.clone()),
        ("Notify days before", threshold),
    ];
    output::print_record(settings, &rows, format);
}
