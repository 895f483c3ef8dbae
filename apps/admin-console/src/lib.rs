//! # Beat Admin Console
//!
//! Core library for the Beat Admin pricing console.
//!
//! ## Module Organization
//! ```text
//! beat_admin/
//! ├── lib.rs           ◄─── You are here (logging setup, re-exports)
//! ├── console.rs       ◄─── AdminConsole: owns backend + state services
//! ├── state/
//! │   ├── mod.rs       ◄─── State type exports
//! │   ├── editor.rs    ◄─── Beats on the page and their field values
//! │   ├── notifications.rs ◄─ Toast queue
//! │   ├── errors.rs    ◄─── Inline per-beat errors
//! │   ├── loading.rs   ◄─── Busy controls
//! │   ├── modal.rs     ◄─── Alert/confirm dialogs
//! │   └── config.rs    ◄─── TOML + environment configuration
//! ├── commands/
//! │   ├── mod.rs       ◄─── CommandOutcome, shared error reporting
//! │   ├── beat.rs      ◄─── Edit and save commands
//! │   ├── bundle.rs    ◄─── Bundle image upload
//! │   └── maintenance.rs ◄── Database update/reset/stats
//! └── error.rs         ◄─── Startup errors
//! ```
//!
//! ## Explicit Services
//! Every service is constructed once and owned by [`AdminConsole`]. Commands
//! receive the console and reach the services through it; nothing is global.

pub mod commands;
pub mod console;
pub mod error;
pub mod state;

use tracing_subscriber::EnvFilter;

pub use commands::CommandOutcome;
pub use console::AdminConsole;
pub use error::{ConsoleError, ConsoleResult};

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=beat_api=trace` - Trace HTTP calls only
/// - Default: INFO, DEBUG for the beat crates
///
/// Logs go to stderr so command output on stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,beat_admin=debug,beat_api=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
