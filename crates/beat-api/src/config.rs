//! # Client Configuration
//!
//! Where the admin server lives and how long to wait for it.
//!
//! ## File Format
//! This struct is the `[api]` table of the console's config file:
//! ```toml
//! [api]
//! base_url = "http://127.0.0.1:5000"
//! form_path = "/"
//! connect_timeout_secs = 5
//! request_timeout_secs = 30
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// API Settings
// =============================================================================

/// Connection settings for the admin server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root URL of the admin server. Endpoint paths are joined onto it.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path the single-beat form posts to.
    #[serde(default = "default_form_path")]
    pub form_path: String,

    /// Connection timeout (seconds).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Whole-request timeout (seconds). Image uploads share it.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_form_path() -> String {
    "/".to_string()
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            form_path: default_form_path(),
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ApiConfig {
    /// Settings pointing at `base_url`, everything else default.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Checks the settings.
    ///
    /// ## Rules
    /// - `base_url` parses and uses `http` or `https`
    /// - both timeouts are positive
    pub fn validate(&self) -> ApiResult<()> {
        let url = Url::parse(&self.base_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidUrl(format!(
                "'{}' must use http or https",
                self.base_url
            )));
        }

        if self.connect_timeout_secs == 0 || self.request_timeout_secs == 0 {
            return Err(ApiError::InvalidConfig(
                "timeouts must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Base URL with a trailing slash, so relative joins keep any path prefix.
    pub fn base(&self) -> ApiResult<Url> {
        let mut raw = self.base_url.trim().to_string();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        Ok(Url::parse(&raw)?)
    }

    /// HTTP client settings derived from this config.
    pub fn http(&self) -> HttpClientConfig {
        HttpClientConfig::default()
            .with_connect_timeout(Duration::from_secs(self.connect_timeout_secs))
            .with_request_timeout(Duration::from_secs(self.request_timeout_secs))
    }
}

// =============================================================================
// HTTP Client
// =============================================================================

/// Knobs for the underlying `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        HttpClientConfig {
            connect_timeout: Duration::from_secs(default_connect_timeout()),
            request_timeout: Duration::from_secs(default_request_timeout()),
        }
    }
}

impl HttpClientConfig {
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Builds the shared HTTP client.
pub fn create_http_client(config: &HttpClientConfig) -> ApiResult<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(concat!("beat-admin/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ApiError::InvalidConfig(e.to_string()))
}
