//! # Maintenance Commands
//!
//! Database actions from the admin maintenance page.
//!
//! ## Reset Confirmation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌────────────────────────────────────────────────────────────────┐    │
//! │  │  Reset database                                                │    │
//! │  │                                                                │    │
//! │  │  This deletes every beat, bundle and sale, then rebuilds the   │    │
//! │  │  database from scratch. This cannot be undone.                 │    │
//! │  │                                                                │    │
//! │  │                         [ Cancel ]  [ Yes, reset ]             │    │
//! │  └────────────────────────────────────────────────────────────────┘    │
//! │                                                                         │
//! │  Cancel ──► Cancelled, nothing sent                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use beat_api::{ActionReply, AdminBackend};
use tracing::{debug, info, warn};

use super::{detail_toast, report_api_error, CommandOutcome};
use crate::console::AdminConsole;
use crate::state::{Control, Dialog, DialogKind, Prompter, ToastLevel};

const UPDATE_DONE_MESSAGE: &str = "Database updated successfully";
const UPDATE_FAILED_MESSAGE: &str = "Database update failed";
const RESET_DONE_MESSAGE: &str = "Database reset successfully";
const RESET_FAILED_MESSAGE: &str = "Database reset failed";

pub const RESET_DIALOG_TITLE: &str = "Reset database";
const RESET_DIALOG_MESSAGE: &str = "This deletes every beat, bundle and sale, then rebuilds the \
                                    database from scratch. This cannot be undone.";

pub async fn update_database<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
) -> CommandOutcome {
    info!("update_database command");

    let Some(_guard) = console.loading.begin(Control::UpdateDatabase) else {
        return CommandOutcome::Busy;
    };

    match console.backend.update_database().await {
        Ok(reply) => {
            announce(console, reply, UPDATE_DONE_MESSAGE);
            refresh_stats(console).await;
            CommandOutcome::Completed
        }
        Err(e) => {
            report_api_error(&mut console.notifications, &e, UPDATE_FAILED_MESSAGE);
            CommandOutcome::Failed
        }
    }
}

/// Asks for confirmation, then wipes and rebuilds the server database.
pub async fn reset_database<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
) -> CommandOutcome {
    info!("reset_database command");

    let Some(_guard) = console.loading.begin(Control::ResetDatabase) else {
        return CommandOutcome::Busy;
    };

    let dialog = Dialog::new(DialogKind::Warning, RESET_DIALOG_MESSAGE)
        .with_title(RESET_DIALOG_TITLE)
        .with_labels("Yes, reset", "Cancel");
    if !console.prompter.confirm(&dialog) {
        info!("Database reset cancelled");
        return CommandOutcome::Cancelled;
    }

    match console.backend.reset_database().await {
        Ok(reply) => {
            let done = reply.message.clone().unwrap_or_else(|| RESET_DONE_MESSAGE.to_string());
            announce(console, reply, RESET_DONE_MESSAGE);
            console.prompter.alert(&Dialog::new(DialogKind::Success, done));
            refresh_stats(console).await;
            CommandOutcome::Completed
        }
        Err(e) => {
            report_api_error(&mut console.notifications, &e, RESET_FAILED_MESSAGE);
            CommandOutcome::Failed
        }
    }
}

/// Reloads the maintenance counters. Failures are only logged.
pub async fn refresh_stats<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
) -> CommandOutcome {
    match console.backend.database_stats().await {
        Ok(stats) => {
            debug!(total_beats = stats.total_beats, "Database stats refreshed");
            console.stats = Some(stats);
            CommandOutcome::Completed
        }
        Err(e) => {
            warn!(error = %e, "Could not load database stats");
            CommandOutcome::Failed
        }
    }
}

fn announce<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
    reply: ActionReply,
    default: &str,
) {
    let message = reply.message.unwrap_or_else(|| default.to_string());
    console.notifications.success(message);

    if !reply.details.is_empty() {
        console
            .notifications
            .show(reply.details.join("\n"), ToastLevel::Info, detail_toast());
    }
}
