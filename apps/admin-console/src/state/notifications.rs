//! # Notifications
//!
//! Toast queue shown in the corner of the admin panel.
//!
//! ## Toast Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  show() ──► queued (rendered: false)                                    │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  drain_unrendered() ──► front end draws it (rendered: true)             │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  expire(now) past expires_at ──► dropped                                │
//! │  remove(id) / clear() ──────────► dropped early                         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::state::config::{NotificationSettings, MAX_TOAST_DURATION_MS};

/// Identifies a toast. Starts at 1 and only grows.
pub type ToastId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastLevel {
    Success,
    Error,
    Warning,
    Info,
}

impl std::fmt::Display for ToastLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToastLevel::Success => write!(f, "success"),
            ToastLevel::Error => write!(f, "error"),
            ToastLevel::Warning => write!(f, "warning"),
            ToastLevel::Info => write!(f, "info"),
        }
    }
}

/// Per-toast overrides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOptions {
    pub title: Option<String>,
    /// Lifetime; the level default when `None`.
    pub duration: Option<Duration>,
}

impl ToastOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        ToastOptions {
            title: Some(title.into()),
            duration: None,
        }
    }

    #[must_use]
    pub fn lasting(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub level: ToastLevel,
    pub title: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    #[serde(skip)]
    rendered: bool,
}

/// The toast manager.
#[derive(Debug, Clone)]
pub struct Notifications {
    toasts: Vec<Toast>,
    next_id: ToastId,
    default_duration: Duration,
    error_duration: Duration,
}

impl Notifications {
    pub fn new(settings: &NotificationSettings) -> Self {
        Notifications {
            toasts: Vec::new(),
            next_id: 1,
            default_duration: lifetime_from_ms(settings.default_duration_ms),
            error_duration: lifetime_from_ms(settings.error_duration_ms),
        }
    }

    /// Queues a toast and returns its id.
    pub fn show(
        &mut self,
        message: impl Into<String>,
        level: ToastLevel,
        options: ToastOptions,
    ) -> ToastId {
        self.show_at(Utc::now(), message, level, options)
    }

    /// [`show`](Self::show) with an explicit clock.
    pub fn show_at(
        &mut self,
        now: DateTime<Utc>,
        message: impl Into<String>,
        level: ToastLevel,
        options: ToastOptions,
    ) -> ToastId {
        let id = self.next_id;
        self.next_id += 1;

        let lifetime = options.duration.unwrap_or(match level {
            ToastLevel::Error => self.error_duration,
            _ => self.default_duration,
        });

        self.toasts.push(Toast {
            id,
            level,
            title: options.title,
            message: message.into(),
            created_at: now,
            expires_at: now.checked_add_signed(lifetime).unwrap_or(DateTime::<Utc>::MAX_UTC),
            rendered: false,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastLevel::Success, ToastOptions::default())
    }

    pub fn error(&mut self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastLevel::Error, ToastOptions::default())
    }

    pub fn warning(&mut self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastLevel::Warning, ToastOptions::default())
    }

    pub fn info(&mut self, message: impl Into<String>) -> ToastId {
        self.show(message, ToastLevel::Info, ToastOptions::default())
    }

    /// Removes one toast. Returns false if it was already gone.
    pub fn remove(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    pub fn clear(&mut self) {
        self.toasts.clear();
    }

    /// Drops every toast whose deadline has passed. Returns how many went.
    pub fn expire(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.expires_at > now);
        before - self.toasts.len()
    }

    /// Toasts still on screen, oldest first.
    pub fn active(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    /// Toasts the front end has not drawn yet, marking them drawn.
    pub fn drain_unrendered(&mut self) -> Vec<Toast> {
        self.toasts
            .iter_mut()
            .filter(|t| !t.rendered)
            .map(|t| {
                t.rendered = true;
                t.clone()
            })
            .collect()
    }
}

/// Clamps to [`MAX_TOAST_DURATION_MS`] so unvalidated settings cannot wrap.
fn lifetime_from_ms(ms: u64) -> Duration {
    let ms = i64::try_from(ms.min(MAX_TOAST_DURATION_MS)).unwrap_or(i64::MAX);
    Duration::milliseconds(ms)
}

impl Default for Notifications {
    fn default() -> Self {
        Self::new(&NotificationSettings::default())
    }
}
