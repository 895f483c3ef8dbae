//! # Dialogs
//!
//! Blocking alert and confirm prompts.
//!
//! The console never talks to a terminal or a window directly; it asks a
//! [`Prompter`]. The binary supplies one that reads stdin, tests supply a
//! scripted one.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DialogKind {
    Alert,
    Confirm,
    Error,
    Success,
    Warning,
    Info,
}

impl DialogKind {
    pub const fn default_title(&self) -> &'static str {
        match self {
            DialogKind::Alert => "Attention",
            DialogKind::Confirm => "Confirm",
            DialogKind::Error => "Error",
            DialogKind::Success => "Success",
            DialogKind::Warning => "Attention",
            DialogKind::Info => "Information",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Dialog {
    /// A dialog with the kind's default title and OK/Cancel labels.
    pub fn new(kind: DialogKind, message: impl Into<String>) -> Self {
        Dialog {
            kind,
            title: kind.default_title().to_string(),
            message: message.into(),
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }

    pub fn confirm(message: impl Into<String>) -> Self {
        Self::new(DialogKind::Confirm, message)
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_labels(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_label = confirm.into();
        self.cancel_label = cancel.into();
        self
    }
}

/// Shows dialogs and waits for the answer.
pub trait Prompter {
    fn alert(&mut self, dialog: &Dialog);

    /// True when the admin picked the confirm button.
    fn confirm(&mut self, dialog: &Dialog) -> bool;
}

/// Answers every confirm the same way. Alerts are dropped.
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Prompter for FixedAnswer {
    fn alert(&mut self, _dialog: &Dialog) {}

    fn confirm(&mut self, _dialog: &Dialog) -> bool {
        self.0
    }
}
