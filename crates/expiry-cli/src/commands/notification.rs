//! Notification inbox CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use super::App;
use crate::output::{self, OutputFormat};
use expiry_core::error::AppError;
use expiry_core::types::{NotificationId, UserId};

/// Arguments for notification commands
#[derive(Debug, Args)]
pub struct NotificationArgs {
    /// Owning user
    #[arg(long)]
    pub owner: UserId,

    /// Notification subcommand
    #[command(subcommand)]
    pub command: NotificationCommand,
}

/// Notification subcommands
#[derive(Debug, Subcommand)]
pub enum NotificationCommand {
    /// List notifications, newest first
    List {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,
    },
    /// Count unread notifications
    Unread,
    /// Mark one notification read
    Read {
        /// Notification ID
        id: NotificationId,
    },
    /// Mark every notification read
    ReadAll,
    /// Dismiss a notification
    Delete {
        /// Notification ID
        id: NotificationId,
    },
}

/// Notification display row for table output
#[derive(Debug, Serialize, Tabled)]
struct NotificationRow {
    /// Notification ID
    id: String,
    /// Kind
    kind: String,
    /// Message
    message: String,
    /// Read flag
    read: bool,
    /// Created at
    created_at: String,
}

/// Execute notification commands
pub async fn execute(
    args: &NotificationArgs,
    app: &App,
    format: OutputFormat,
) -> Result<(), AppError> {
    let owner = args.owner;

    match &args.command {
        NotificationCommand::List { unread } => {
            let rows: Vec<NotificationRow> = app
                .notifications
                .list(owner)
                .await?
                .into_iter()
                .filter(|n| !unread || n.is_unread())
                .map(|n| NotificationRow {
                    id: n.id.to_string(),
                    kind: n.kind.to_string(),
                    message: n.message,
                    read: n.is_read,
                    created_at: n.created_at.format("%Y-%m-%d %H:%M").to_string(),
                })
                .collect();
            output::print_list(&rows, format);
        }
        NotificationCommand::Unread => {
            let count = app.notifications.unread_count(owner).await?;
            output::print_record(
                &serde_json::json!({ "unread": count }),
                &[("Unread", count.to_string())],
                format,
            );
        }
        NotificationCommand::Read { id } => {
            app.notifications.mark_read(owner, *id).await?;
            output::print_success(&format!("Notification {id} marked read"));
        }
        NotificationCommand::ReadAll => {
            let changed = app.notifications.mark_all_read(owner).await?;
            output::print_success(&format!("{changed} notification(s) marked read"));
        }
        NotificationCommand::Delete { id } => {
            app.notifications.delete(owner, *id).await?;
            output::print_success(&format!("Notification {id} dismissed"));
        }
    }

    Ok(())
}
