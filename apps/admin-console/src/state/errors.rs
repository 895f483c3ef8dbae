//! # Inline Errors
//!
//! The red message under a beat's row, paired with an error toast.
//!
//! At most one inline error per beat. Showing a new one replaces the old
//! one and its toast; both clear themselves after eight seconds.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use crate::state::notifications::{Notifications, ToastId, ToastLevel, ToastOptions};

pub const VALIDATION_TOAST_TITLE: &str = "Validation error";

const TOAST_LIFETIME_SECS: i64 = 6;
const INLINE_LIFETIME_SECS: i64 = 8;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineError {
    pub beat_id: i64,
    pub message: String,
    pub toast_id: ToastId,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct ErrorDisplay {
    errors: HashMap<i64, InlineError>,
}

impl ErrorDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(
        &mut self,
        notifications: &mut Notifications,
        beat_id: i64,
        message: impl Into<String>,
    ) {
        self.show_at(Utc::now(), notifications, beat_id, message);
    }

    pub fn show_at(
        &mut self,
        now: DateTime<Utc>,
        notifications: &mut Notifications,
        beat_id: i64,
        message: impl Into<String>,
    ) {
        self.clear(notifications, beat_id);

        let message = message.into();
        let toast_id = notifications.show_at(
            now,
            message.clone(),
            ToastLevel::Error,
            ToastOptions::titled(VALIDATION_TOAST_TITLE)
                .lasting(Duration::seconds(TOAST_LIFETIME_SECS)),
        );

        self.errors.insert(
            beat_id,
            InlineError {
                beat_id,
                message,
                toast_id,
                expires_at: now + Duration::seconds(INLINE_LIFETIME_SECS),
            },
        );
    }

    /// Removes the beat's inline error and its toast, if any.
    pub fn clear(&mut self, notifications: &mut Notifications, beat_id: i64) {
        if let Some(previous) = self.errors.remove(&beat_id) {
            notifications.remove(previous.toast_id);
        }
    }

    /// Drops inline errors past their deadline. Returns the affected beats.
    pub fn expire(&mut self, now: DateTime<Utc>) -> Vec<i64> {
        let mut expired: Vec<i64> = self
            .errors
            .values()
            .filter(|e| e.expires_at <= now)
            .map(|e| e.beat_id)
            .collect();
        expired.sort_unstable();

        for id in &expired {
            self.errors.remove(id);
        }
        expired
    }

    pub fn get(&self, beat_id: i64) -> Option<&InlineError> {
        self.errors.get(&beat_id)
    }

    pub fn message(&self, beat_id: i64) -> Option<&str> {
        self.errors.get(&beat_id).map(|e| e.message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}
