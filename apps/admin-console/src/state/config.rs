//! # Console Configuration
//!
//! Settings loaded at startup.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     BEAT_ADMIN_BASE_URL=https://shop.example.com                       │
//! │     BEAT_ADMIN_FORM_PATH=/admin                                        │
//! │     BEAT_ADMIN_REQUEST_TIMEOUT_SECS=60                                 │
//! │                                                                         │
//! │  2. TOML Config File (--config, or the platform default)               │
//! │     ~/.config/admin/console.toml (Linux)                               │
//! │     ~/Library/Application Support/com.beat.admin/console.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     http://127.0.0.1:5000, 4 s toasts, 6 s error toasts                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # console.toml
//! [api]
//! base_url = "https://shop.example.com"
//! form_path = "/"
//! connect_timeout_secs = 5
//! request_timeout_secs = 30
//!
//! [notifications]
//! default_duration_ms = 4000
//! error_duration_ms = 6000
//! ```

use std::path::{Path, PathBuf};

use beat_api::ApiConfig;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConsoleError, ConsoleResult};

pub const ENV_BASE_URL: &str = "BEAT_ADMIN_BASE_URL";
pub const ENV_FORM_PATH: &str = "BEAT_ADMIN_FORM_PATH";
pub const ENV_REQUEST_TIMEOUT: &str = "BEAT_ADMIN_REQUEST_TIMEOUT_SECS";

/// Longest toast lifetime a config file may ask for (one hour).
pub const MAX_TOAST_DURATION_MS: u64 = 60 * 60 * 1000;

// =============================================================================
// Notification Settings
// =============================================================================

/// Default toast lifetimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default = "default_duration_ms")]
    pub default_duration_ms: u64,

    #[serde(default = "default_error_duration_ms")]
    pub error_duration_ms: u64,
}

fn default_duration_ms() -> u64 {
    4000
}

fn default_error_duration_ms() -> u64 {
    6000
}

impl Default for NotificationSettings {
    fn default() -> Self {
        NotificationSettings {
            default_duration_ms: default_duration_ms(),
            error_duration_ms: default_error_duration_ms(),
        }
    }
}

// =============================================================================
// Console Config
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub notifications: NotificationSettings,
}

impl ConsoleConfig {
    /// Loads defaults, then the config file, then environment overrides,
    /// and validates the result.
    pub fn load(config_path: Option<PathBuf>) -> ConsoleResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading console config from file");
                let contents = std::fs::read_to_string(&path).map_err(|e| {
                    ConsoleError::ConfigLoadFailed(format!("{}: {e}", path.display()))
                })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Writes the config as pretty TOML, creating parent directories.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConsoleResult<PathBuf> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConsoleError::NoConfigDir)?;

        write_toml(&path, self)?;
        info!(?path, "Console config saved");
        Ok(path)
    }

    pub fn validate(&self) -> ConsoleResult<()> {
        self.api
            .validate()
            .map_err(|e| ConsoleError::InvalidConfig(e.to_string()))?;

        let durations = [
            ("default_duration_ms", self.notifications.default_duration_ms),
            ("error_duration_ms", self.notifications.error_duration_ms),
        ];
        for (name, ms) in durations {
            if ms == 0 || ms > MAX_TOAST_DURATION_MS {
                return Err(ConsoleError::InvalidConfig(format!(
                    "notifications.{name} must be between 1 and {MAX_TOAST_DURATION_MS}, got {ms}"
                )));
            }
        }

        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies `BEAT_ADMIN_*` overrides read through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL) {
            debug!(%url, "Base URL overridden from environment");
            self.api.base_url = url;
        }

        if let Some(path) = lookup(ENV_FORM_PATH) {
            self.api.form_path = path;
        }

        if let Some(raw) = lookup(ENV_REQUEST_TIMEOUT) {
            match raw.parse::<u64>() {
                Ok(secs) => self.api.request_timeout_secs = secs,
                Err(_) => warn!(value = %raw, "Ignoring invalid {}", ENV_REQUEST_TIMEOUT),
            }
        }
    }

    /// `console.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("com", "beat", "admin").map(|dirs| dirs.config_dir().join("console.toml"))
    }
}

fn write_toml(path: &Path, config: &ConsoleConfig) -> ConsoleResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConsoleError::ConfigSaveFailed(e.to_string()))?;
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents).map_err(|e| ConsoleError::ConfigSaveFailed(e.to_string()))?;
    Ok(())
}
