//! # Loading State
//!
//! Tracks which controls have a request in flight.
//!
//! ## Thread Safety
//! The set lives behind `Arc<Mutex<T>>` so a [`LoadingGuard`] can be held
//! across an `.await` without borrowing the console.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  begin(SaveBeat(3)) ──► Some(guard)   button disabled, spinner on       │
//! │  begin(SaveBeat(3)) ──► None          duplicate click ignored           │
//! │  drop(guard)        ──► released      button enabled again              │
//! │                                                                         │
//! │  overlay_visible() is true while SaveAll or a database action runs     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

/// A control that can be busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "control", content = "beat_id")]
pub enum Control {
    SaveBeat(i64),
    SaveAll,
    ImageUpload,
    UpdateDatabase,
    ResetDatabase,
}

impl Control {
    /// Whether the full-page overlay covers the panel while this runs.
    pub const fn blocks_page(&self) -> bool {
        matches!(
            self,
            Control::SaveAll | Control::UpdateDatabase | Control::ResetDatabase
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    active: Arc<Mutex<HashSet<Control>>>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `control` busy. `None` if it already is.
    #[must_use]
    pub fn begin(&self, control: Control) -> Option<LoadingGuard> {
        if !self.lock().insert(control) {
            return None;
        }

        Some(LoadingGuard {
            control,
            active: Arc::clone(&self.active),
        })
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.lock().contains(&control)
    }

    pub fn overlay_visible(&self) -> bool {
        self.lock().iter().any(Control::blocks_page)
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<Control>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Releases its control when dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    control: Control,
    active: Arc<Mutex<HashSet<Control>>>,
}

impl LoadingGuard {
    pub fn control(&self) -> Control {
        self.control
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.active
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.control);
    }
}
