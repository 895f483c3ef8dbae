//! # beat-api: Admin Server Client
//!
//! Typed access to the beat store's admin endpoints.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          beat-api Modules                               │
//! │                                                                         │
//! │  client.rs    AdminBackend trait + AdminClient (reqwest)               │
//! │  protocol.rs  Wire bodies: euros as numbers, flags as 0/1              │
//! │  config.rs    ApiConfig ([api] table), HTTP client builder             │
//! │  error.rs     ApiError: Network / Timeout / Server / ...               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust,no_run
//! use beat_api::{AdminBackend, AdminClient, ApiConfig};
//!
//! # async fn run() -> beat_api::ApiResult<()> {
//! let client = AdminClient::new(&ApiConfig::with_base_url("http://127.0.0.1:5000"))?;
//! let stats = client.database_stats().await?;
//! println!("{} beats", stats.total_beats);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;

pub use client::{AdminBackend, AdminClient};
pub use config::{create_http_client, ApiConfig, HttpClientConfig};
pub use error::{ApiError, ApiResult};
pub use protocol::{ActionReply, DatabaseStats};
