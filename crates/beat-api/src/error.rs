//! # API Error Types
//!
//! Error types for calls to the admin server.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Server              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Network        │  │  Server (non-2xx or     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │    success: false)      │ │
//! │  │  InvalidRequest │  │                 │  │  InvalidResponse        │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for admin server calls.
pub type ApiResult<T> = Result<T, ApiError>;

/// Everything that can go wrong talking to the admin server.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The server could not be reached.
    #[error("Network error: {0}")]
    Network(String),

    /// The server did not answer in time.
    #[error("Request timed out")]
    Timeout,

    // =========================================================================
    // Server Errors
    // =========================================================================
    /// The server answered with a non-2xx status or `success: false`.
    ///
    /// `message` is the server's own error text when it sent one.
    #[error("{message}")]
    Server {
        status: Option<u16>,
        message: String,
        details: Vec<String>,
    },

    /// The server answered 2xx with a body we could not use.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    // =========================================================================
    // Client-Side Errors
    // =========================================================================
    /// Bad base URL or endpoint path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Bad client configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// The request could not be built (e.g. a malformed MIME type).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else if err.is_builder() {
            ApiError::InvalidRequest(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ApiError {
    /// Builds a server rejection.
    pub fn server(status: Option<u16>, message: impl Into<String>, details: Vec<String>) -> Self {
        ApiError::Server {
            status,
            message: message.into(),
            details,
        }
    }

    /// Returns true if the request never got an answer.
    ///
    /// The admin sees "Connection error" for these and can simply retry.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Timeout)
    }

    /// Server-provided detail lines, empty for non-server errors.
    pub fn details(&self) -> &[String] {
        match self {
            ApiError::Server { details, .. } => details,
            _ => &[],
        }
    }

    /// HTTP status of a server rejection, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => *status,
            _ => None,
        }
    }
}
