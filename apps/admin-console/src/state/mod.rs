//! # Console State
//!
//! Presentation services owned by [`AdminConsole`](crate::console::AdminConsole).
//!
//! ## State Types
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Console State Types                                  │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │   BeatEditor     │ │  Notifications   │ │   ErrorDisplay       │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Page beats    │ │  • Toast queue   │ │  • One inline error  │    │
//! │  │  • Field edits   │ │  • Deadlines     │ │    per beat          │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! │                                                                         │
//! │  ┌──────────────────┐ ┌──────────────────┐ ┌──────────────────────┐    │
//! │  │  LoadingTracker  │ │    Prompter      │ │   ConsoleConfig      │    │
//! │  │                  │ │                  │ │                      │    │
//! │  │  • Busy controls │ │  • alert/confirm │ │  • [api]             │    │
//! │  │  • Overlay       │ │    dialogs       │ │  • [notifications]   │    │
//! │  └──────────────────┘ └──────────────────┘ └──────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod editor;
pub mod errors;
pub mod loading;
pub mod modal;
pub mod notifications;

pub use config::{ConsoleConfig, NotificationSettings};
pub use editor::BeatEditor;
pub use errors::{ErrorDisplay, InlineError};
pub use loading::{Control, LoadingGuard, LoadingTracker};
pub use modal::{Dialog, DialogKind, FixedAnswer, Prompter};
pub use notifications::{Notifications, Toast, ToastId, ToastLevel, ToastOptions};
