//! # Console Error Type
//!
//! Errors that stop the console before a command can run: bad config,
//! unreadable files, malformed beat lists.
//!
//! Command failures are not errors at this level. Commands catch them and
//! turn them into notifications, returning a
//! [`CommandOutcome`](crate::commands::CommandOutcome).

use beat_api::ApiError;
use beat_core::CoreError;
use thiserror::Error;

/// Result type alias for console setup.
pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Error)]
pub enum ConsoleError {
    /// Failed to read or parse the config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to write the config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    /// A setting is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// No platform config directory and no `--config` given.
    #[error("Could not determine the config directory")]
    NoConfigDir,

    /// File access outside config handling (beat lists, images).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed beat list.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<toml::de::Error> for ConsoleError {
    fn from(err: toml::de::Error) -> Self {
        ConsoleError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ConsoleError {
    fn from(err: toml::ser::Error) -> Self {
        ConsoleError::ConfigSaveFailed(err.to_string())
    }
}
