//! # Console Commands
//!
//! Every admin action the pricing page offers.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Console Commands                                  │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐  ┌────────────────┐  │
//! │  │   beat.rs           │  │   bundle.rs         │  │ maintenance.rs │  │
//! │  │                     │  │                     │  │                │  │
//! │  │  • edit_field       │  │  • upload_bundle_   │  │ • update_      │  │
//! │  │  • set_exclusive    │  │    image            │  │   database     │  │
//! │  │  • save_beat        │  │                     │  │ • reset_       │  │
//! │  │  • save_all         │  │                     │  │   database     │  │
//! │  │                     │  │                     │  │ • refresh_stats│  │
//! │  └─────────────────────┘  └─────────────────────┘  └────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Handling
//! Commands never return errors. Every failure becomes a toast or an
//! inline error, and the caller learns what happened from the
//! [`CommandOutcome`].

pub mod beat;
pub mod bundle;
pub mod maintenance;

#[cfg(test)]
pub(crate) mod testing;

use beat_api::ApiError;
use chrono::Duration;
use serde::Serialize;
use tracing::warn;

use crate::state::{Notifications, ToastLevel, ToastOptions};

pub const NETWORK_ERROR_TITLE: &str = "Network error";
pub const NETWORK_ERROR_MESSAGE: &str = "Connection error. Check your connection and try again.";

/// Lifetime of toasts listing several problems.
pub(crate) const DETAIL_TOAST_SECS: i64 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The action ran and the server accepted it.
    Completed,
    /// Local validation stopped the action before any request.
    Invalid,
    /// The request was sent and failed.
    Failed,
    /// The same control already has a request in flight.
    Busy,
    /// The admin declined a confirmation.
    Cancelled,
    /// Nothing to do.
    Skipped,
}

impl CommandOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(
            self,
            CommandOutcome::Completed | CommandOutcome::Skipped | CommandOutcome::Cancelled
        )
    }
}

pub(crate) fn detail_toast() -> ToastOptions {
    ToastOptions::default().lasting(Duration::seconds(DETAIL_TOAST_SECS))
}

/// Surfaces a failed request.
///
/// Network failures get the connection toast. Server rejections show the
/// server's text verbatim plus one toast per detail. Anything else shows
/// `fallback`.
pub(crate) fn report_api_error(notifications: &mut Notifications, err: &ApiError, fallback: &str) {
    warn!(error = %err, status = ?err.status(), "Request failed");

    match err {
        e if e.is_network() => {
            notifications.show(
                NETWORK_ERROR_MESSAGE,
                ToastLevel::Error,
                ToastOptions::titled(NETWORK_ERROR_TITLE),
            );
        }
        ApiError::Server { message, details, .. } => {
            notifications.error(message.clone());
            for detail in details {
                notifications.show(detail.clone(), ToastLevel::Error, detail_toast());
            }
        }
        _ => {
            notifications.error(fallback);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_toast() {
        let mut toasts = Notifications::default();
        report_api_error(&mut toasts, &ApiError::Timeout, "fallback");

        let toast = &toasts.active()[0];
        assert_eq!(toast.message, NETWORK_ERROR_MESSAGE);
        assert_eq!(toast.title.as_deref(), Some(NETWORK_ERROR_TITLE));
    }

    #[test]
    fn test_server_error_with_details() {
        let mut toasts = Notifications::default();
        let details = vec!["Beat 1".to_string(), "Beat 2".to_string()];
        let err = ApiError::server(Some(400), "Invalid prices", details);
        report_api_error(&mut toasts, &err, "fallback");

        let messages: Vec<&str> = toasts.active().iter().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["Invalid prices", "Beat 1", "Beat 2"]);
        let detail = &toasts.active()[1];
        assert_eq!(detail.expires_at - detail.created_at, Duration::seconds(8));
    }

    #[test]
    fn test_other_errors_use_fallback() {
        let mut toasts = Notifications::default();
        report_api_error(&mut toasts, &ApiError::InvalidResponse("html".into()), "Save failed");
        assert_eq!(toasts.active()[0].message, "Save failed");
    }

    #[test]
    fn test_outcome_success() {
        assert!(CommandOutcome::Completed.is_success());
        assert!(CommandOutcome::Cancelled.is_success());
        assert!(!CommandOutcome::Busy.is_success());
        assert!(!CommandOutcome::Invalid.is_success());
    }
}
