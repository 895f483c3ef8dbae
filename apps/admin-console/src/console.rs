//! # Admin Console
//!
//! Owns the backend, the prompter and every presentation service.
//! Commands in [`crate::commands`] borrow it mutably, one at a time.

use beat_api::{AdminBackend, DatabaseStats};
use beat_core::BundleImage;
use chrono::{DateTime, Utc};

use crate::state::{
    BeatEditor, ErrorDisplay, LoadingTracker, NotificationSettings, Notifications, Prompter,
};

pub struct AdminConsole<B, P> {
    pub(crate) backend: B,
    pub(crate) prompter: P,
    pub(crate) editor: BeatEditor,
    pub(crate) notifications: Notifications,
    pub(crate) errors: ErrorDisplay,
    pub(crate) loading: LoadingTracker,
    pub(crate) bundle_image: Option<BundleImage>,
    pub(crate) stats: Option<DatabaseStats>,
}

impl<B: AdminBackend, P: Prompter> AdminConsole<B, P> {
    pub fn new(backend: B, prompter: P, settings: &NotificationSettings) -> Self {
        AdminConsole {
            backend,
            prompter,
            editor: BeatEditor::new(),
            notifications: Notifications::new(settings),
            errors: ErrorDisplay::new(),
            loading: LoadingTracker::new(),
            bundle_image: None,
            stats: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn editor(&self) -> &BeatEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut BeatEditor {
        &mut self.editor
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut Notifications {
        &mut self.notifications
    }

    pub fn errors(&self) -> &ErrorDisplay {
        &self.errors
    }

    /// Shared handle; clones see the same busy set.
    pub fn loading(&self) -> &LoadingTracker {
        &self.loading
    }

    pub fn bundle_image(&self) -> Option<&BundleImage> {
        self.bundle_image.as_ref()
    }

    /// Sets the image already attached to the bundle being edited.
    pub fn set_bundle_image(&mut self, image: Option<BundleImage>) {
        self.bundle_image = image;
    }

    pub fn stats(&self) -> Option<&DatabaseStats> {
        self.stats.as_ref()
    }

    /// Expires toasts and inline errors whose time is up.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        self.notifications.expire(now);
        self.errors.expire(now);
    }
}
