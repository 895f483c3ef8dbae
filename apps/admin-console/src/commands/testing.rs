//! In-memory backend and scripted prompter for command tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use beat_api::{ActionReply, AdminBackend, ApiError, ApiResult, DatabaseStats};
use beat_core::{Beat, BundleImage, ImageUpload, Money, PricedItem};

use crate::console::AdminConsole;
use crate::state::{Dialog, NotificationSettings, Prompter};

/// Succeeds unless an error was queued with [`fail_next`](Self::fail_next).
#[derive(Debug, Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<String>>,
    failures: Mutex<VecDeque<ApiError>>,
}

impl FakeBackend {
    pub fn fail_next(&self, err: ApiError) {
        self.failures.lock().unwrap().push_back(err);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) -> ApiResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AdminBackend for FakeBackend {
    async fn save_beat(&self, beat: &Beat) -> ApiResult<()> {
        self.record(format!("save_beat {}", beat.id))
    }

    async fn save_all_beats(&self, beats: &[Beat]) -> ApiResult<ActionReply> {
        self.record(format!("save_all {}", beats.len()))?;
        Ok(ActionReply {
            message: Some(format!("{} beats updated", beats.len())),
            details: Vec::new(),
        })
    }

    async fn upload_bundle_image(
        &self,
        upload: &ImageUpload,
        previous_key: Option<&str>,
    ) -> ApiResult<BundleImage> {
        self.record(format!("upload {} previous={:?}", upload.file_name, previous_key))?;
        Ok(BundleImage {
            image_key: format!("bundles/{}", upload.file_name),
            image_url: format!("https://cdn.example.com/bundles/{}", upload.file_name),
        })
    }

    async fn update_database(&self) -> ApiResult<ActionReply> {
        self.record("update_database".to_string())?;
        Ok(ActionReply {
            message: Some("Database updated".to_string()),
            details: vec!["2 beats imported".to_string()],
        })
    }

    async fn reset_database(&self) -> ApiResult<ActionReply> {
        self.record("reset_database".to_string())?;
        Ok(ActionReply::default())
    }

    async fn database_stats(&self) -> ApiResult<DatabaseStats> {
        self.record("database_stats".to_string())?;
        Ok(DatabaseStats {
            total_beats: 2,
            exclusive_beats: 1,
            active_bundles: 1,
            sold_exclusive_count: 0,
        })
    }
}

/// Answers confirms from a script (declining once it runs out) and keeps
/// every dialog it was shown.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<bool>,
    pub shown: Vec<Dialog>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().copied().collect(),
            shown: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn alert(&mut self, dialog: &Dialog) {
        self.shown.push(dialog.clone());
    }

    fn confirm(&mut self, dialog: &Dialog) -> bool {
        self.shown.push(dialog.clone());
        self.answers.pop_front().unwrap_or(false)
    }
}

pub type TestConsole = AdminConsole<FakeBackend, ScriptedPrompter>;

/// A console with two valid beats: #1 at full price, #2 discounted 20%.
pub fn console_with(prompter: ScriptedPrompter) -> TestConsole {
    let settings = NotificationSettings::default();
    let mut console = AdminConsole::new(FakeBackend::default(), prompter, &settings);
    console
        .editor_mut()
        .load(vec![
            Beat::new(1, "Sunset", Money::from_cents(1999)),
            Beat {
                id: 2,
                title: "Rain".to_string(),
                is_exclusive: false,
                pricing: PricedItem::discounted(Money::from_cents(10000), 20),
            },
        ])
        .unwrap();
    console
}

pub fn console() -> TestConsole {
    console_with(ScriptedPrompter::default())
}

pub fn messages(console: &TestConsole) -> Vec<String> {
    console
        .notifications()
        .active()
        .iter()
        .map(|t| t.message.clone())
        .collect()
}
