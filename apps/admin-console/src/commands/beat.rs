//! # Beat Commands
//!
//! Editing and saving beat prices.
//!
//! ## Save Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  save_beat(id)                        save_all()                        │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  validate one beat                    any beats? ── no ──► Skipped      │
//! │  first error inline ──► Invalid            │                            │
//! │       │                                    ▼                            │
//! │       ▼                               validate every beat               │
//! │  control busy? ──► Busy               one summary toast ──► Invalid     │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  POST form                            control busy? ──► Busy            │
//! │  failure inline ──► Failed                 │                            │
//! │       │                                    ▼                            │
//! │       ▼                               POST save-all-beats               │
//! │  success toast ──► Completed          server text / details ──► Failed  │
//! │                                            │                            │
//! │                                            ▼                            │
//! │                                       success toast ──► Completed       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use beat_api::AdminBackend;
use beat_core::{EditOutcome, FieldEdit};
use tracing::{debug, info, warn};

use super::{detail_toast, report_api_error, CommandOutcome};
use crate::console::AdminConsole;
use crate::state::{Control, Prompter, ToastLevel};

pub const SAVE_FAILED_MESSAGE: &str = "Save failed. Please try again.";
pub const NO_BEATS_MESSAGE: &str = "No beats found to save";
pub const FIX_ERRORS_PREFIX: &str = "Fix all errors before saving: ";
const SAVE_ALL_DEFAULT_MESSAGE: &str = "All beats saved successfully";

/// Applies one field edit and shows or clears the beat's inline error.
pub fn edit_field<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
    beat_id: i64,
    edit: FieldEdit,
) -> CommandOutcome {
    debug!(beat_id, ?edit, "edit_field command");

    let outcome = match console.editor.edit(beat_id, edit) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(beat_id, error = %e, "Edit on unknown beat");
            console.notifications.error(e.to_string());
            return CommandOutcome::Failed;
        }
    };

    match outcome {
        EditOutcome::Applied => {
            console.errors.clear(&mut console.notifications, beat_id);
            CommandOutcome::Completed
        }
        EditOutcome::Flagged(kind) => {
            console
                .errors
                .show(&mut console.notifications, beat_id, kind.to_string());
            CommandOutcome::Invalid
        }
        EditOutcome::Rejected(rejection) => {
            console
                .errors
                .show(&mut console.notifications, beat_id, rejection.to_string());
            CommandOutcome::Invalid
        }
    }
}

/// Ticks or unticks "Exclusive" on a beat.
pub fn set_exclusive<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
    beat_id: i64,
    exclusive: bool,
) -> CommandOutcome {
    debug!(beat_id, exclusive, "set_exclusive command");

    match console.editor.set_exclusive(beat_id, exclusive) {
        Ok(()) => CommandOutcome::Completed,
        Err(e) => {
            console.notifications.error(e.to_string());
            CommandOutcome::Failed
        }
    }
}

/// Validates and saves one beat through the form endpoint.
pub async fn save_beat<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
    beat_id: i64,
) -> CommandOutcome {
    info!(beat_id, "save_beat command");

    let Some(beat) = console.editor.get(beat_id).cloned() else {
        console.notifications.error(format!("Beat not found: {beat_id}"));
        return CommandOutcome::Failed;
    };

    if let Some(first) = beat.pricing.validate().first() {
        console
            .errors
            .show(&mut console.notifications, beat_id, first.to_string());
        return CommandOutcome::Invalid;
    }

    let Some(_guard) = console.loading.begin(Control::SaveBeat(beat_id)) else {
        debug!(beat_id, "Save already in flight");
        return CommandOutcome::Busy;
    };

    match console.backend.save_beat(&beat).await {
        Ok(()) => {
            console.errors.clear(&mut console.notifications, beat_id);
            console.notifications.success(format!("'{}' saved", beat.label()));
            CommandOutcome::Completed
        }
        Err(e) => {
            warn!(beat_id, error = %e, "Beat save failed");
            console
                .errors
                .show(&mut console.notifications, beat_id, SAVE_FAILED_MESSAGE);
            CommandOutcome::Failed
        }
    }
}

/// Validates every beat, then saves them all in one request.
pub async fn save_all<B: AdminBackend, P: Prompter>(
    console: &mut AdminConsole<B, P>,
) -> CommandOutcome {
    info!(count = console.editor.len(), "save_all command");

    if console.editor.is_empty() {
        console.notifications.warning(NO_BEATS_MESSAGE);
        return CommandOutcome::Skipped;
    }

    let report = console.editor.validate_all();
    if !report.is_clean() {
        debug!(failures = report.failures.len(), "Bulk validation failed");
        let summary = format!("{FIX_ERRORS_PREFIX}{}", report.labelled_messages().join("; "));
        console
            .notifications
            .show(summary, ToastLevel::Error, detail_toast());
        return CommandOutcome::Invalid;
    }

    let Some(_guard) = console.loading.begin(Control::SaveAll) else {
        return CommandOutcome::Busy;
    };

    let result = console.backend.save_all_beats(console.editor.beats()).await;
    match result {
        Ok(reply) => {
            let message = reply
                .message
                .unwrap_or_else(|| SAVE_ALL_DEFAULT_MESSAGE.to_string());
            console.notifications.success(message);
            CommandOutcome::Completed
        }
        Err(e) => {
            report_api_error(&mut console.notifications, &e, SAVE_FAILED_MESSAGE);
            CommandOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{console, messages};
    use crate::commands::NETWORK_ERROR_MESSAGE;
    use beat_api::ApiError;
    use beat_core::{ErrorKind, Money};

    #[test]
    fn test_edit_applied_clears_inline_error() {
        let mut console = console();
        edit_field(&mut console, 1, FieldEdit::OriginalPrice(Money::zero()));
        edit_field(&mut console, 1, FieldEdit::DiscountedPrice(Money::from_cents(500)));
        assert!(console.errors().get(1).is_some());

        let price = FieldEdit::OriginalPrice(Money::from_cents(2500));
        let outcome = edit_field(&mut console, 1, price);
        assert_eq!(outcome, CommandOutcome::Completed);
        assert!(console.errors().get(1).is_none());
        assert!(console.notifications().active().is_empty());
    }

    #[test]
    fn test_edit_rejected_when_not_discounted() {
        let mut console = console();
        let price = FieldEdit::DiscountedPrice(Money::from_cents(999));
        let outcome = edit_field(&mut console, 1, price);

        assert_eq!(outcome, CommandOutcome::Invalid);
        assert_eq!(
            console.errors().message(1),
            Some("Tick 'Discounted' before entering a discounted price")
        );
        assert_eq!(console.editor().get(1).unwrap().pricing.discounted_price, Money::zero());
    }

    #[test]
    fn test_edit_flagged_shows_kind_message() {
        let mut console = console();
        let price = FieldEdit::DiscountedPrice(Money::from_cents(12000));
        let outcome = edit_field(&mut console, 2, price);

        assert_eq!(outcome, CommandOutcome::Invalid);
        assert_eq!(
            console.errors().message(2),
            Some(ErrorKind::DiscountedNotLessThanOriginal.to_string().as_str())
        );
    }

    #[test]
    fn test_edit_unknown_beat() {
        let mut console = console();
        assert_eq!(
            edit_field(&mut console, 42, FieldEdit::DiscountPercent(10)),
            CommandOutcome::Failed
        );
        assert_eq!(set_exclusive(&mut console, 42, true), CommandOutcome::Failed);
        assert_eq!(set_exclusive(&mut console, 2, true), CommandOutcome::Completed);
        assert!(console.editor().get(2).unwrap().is_exclusive);
    }

    #[tokio::test]
    async fn test_save_beat_success() {
        let mut console = console();
        assert_eq!(save_beat(&mut console, 2).await, CommandOutcome::Completed);
        assert_eq!(console.backend().calls(), vec!["save_beat 2"]);
        assert_eq!(messages(&console), vec!["'Rain' saved"]);
    }

    #[tokio::test]
    async fn test_save_beat_invalid_shows_first_error() {
        let mut console = console();
        console
            .editor_mut()
            .edit(2, FieldEdit::DiscountPercent(150))
            .unwrap();

        assert_eq!(save_beat(&mut console, 2).await, CommandOutcome::Invalid);
        assert_eq!(
            console.errors().message(2),
            Some("Discount percentage must be between 1 and 99")
        );
        assert!(console.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_beat_busy() {
        let mut console = console();
        let _guard = console.loading().begin(Control::SaveBeat(1)).unwrap();

        assert_eq!(save_beat(&mut console, 1).await, CommandOutcome::Busy);
        assert!(console.backend().calls().is_empty());
    }

    #[tokio::test]
    async fn test_save_beat_failure_is_inline() {
        let mut console = console();
        console.backend().fail_next(ApiError::server(Some(500), "boom", vec![]));

        assert_eq!(save_beat(&mut console, 1).await, CommandOutcome::Failed);
        assert_eq!(console.errors().message(1), Some(SAVE_FAILED_MESSAGE));
        assert!(!console.loading().is_busy(Control::SaveBeat(1)));
    }

    #[tokio::test]
    async fn test_save_all_success() {
        let mut console = console();
        assert_eq!(save_all(&mut console).await, CommandOutcome::Completed);
        assert_eq!(console.backend().calls(), vec!["save_all 2"]);
        assert_eq!(messages(&console), vec!["2 beats updated"]);
        assert!(!console.loading().overlay_visible());
    }

    #[tokio::test]
    async fn test_save_all_without_beats() {
        let mut console = console();
        console.editor_mut().load(Vec::new()).unwrap();

        assert_eq!(save_all(&mut console).await, CommandOutcome::Skipped);
        assert_eq!(messages(&console), vec![NO_BEATS_MESSAGE]);
        assert_eq!(console.notifications().active()[0].level, ToastLevel::Warning);
    }

    #[tokio::test]
    async fn test_save_all_aggregates_validation_errors() {
        let mut console = console();
        console.editor_mut().edit(1, FieldEdit::OriginalPrice(Money::zero())).unwrap();
        console.editor_mut().edit(2, FieldEdit::DiscountPercent(0)).unwrap();

        assert_eq!(save_all(&mut console).await, CommandOutcome::Invalid);
        assert!(console.backend().calls().is_empty());

        let toasts = console.notifications().active();
        assert_eq!(toasts.len(), 1);
        assert!(toasts[0].message.starts_with(FIX_ERRORS_PREFIX));
        assert!(toasts[0].message.contains("Sunset: Original price must be greater than 0"));
        assert!(toasts[0].message.contains("Rain: Discount percentage must be between 1 and 99"));
        assert_eq!(toasts[0].expires_at - toasts[0].created_at, chrono::Duration::seconds(8));
    }

    #[tokio::test]
    async fn test_save_all_server_rejection() {
        let mut console = console();
        console.backend().fail_next(ApiError::server(
            Some(200),
            "1 beat could not be saved",
            vec!["Beat 2: price locked".to_string()],
        ));

        assert_eq!(save_all(&mut console).await, CommandOutcome::Failed);
        assert_eq!(
            messages(&console),
            vec!["1 beat could not be saved", "Beat 2: price locked"]
        );
    }

    #[tokio::test]
    async fn test_save_all_network_failure() {
        let mut console = console();
        console.backend().fail_next(ApiError::Network("connection refused".into()));

        assert_eq!(save_all(&mut console).await, CommandOutcome::Failed);
        assert_eq!(messages(&console), vec![NETWORK_ERROR_MESSAGE]);
    }

    #[tokio::test]
    async fn test_save_all_busy() {
        let mut console = console();
        let _guard = console.loading().begin(Control::SaveAll).unwrap();
        assert_eq!(save_all(&mut console).await, CommandOutcome::Busy);
    }
}
