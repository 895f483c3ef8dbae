//! # Admin Client
//!
//! `reqwest` implementation of [`AdminBackend`].
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  AdminClient::save_all_beats(&beats)                                    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  SaveAllBeatsRequest (cents → euros, bool → 0/1)                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  POST {base}/api/save-all-beats ──── send error ───► Network / Timeout │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  status 2xx? ── no ──► Server { status, server error text }            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  success: true? ── no ──► Server { message: error, details }           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ActionReply { message, details }                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use beat_core::{Beat, BundleImage, ImageUpload};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use crate::config::{create_http_client, ApiConfig};
use crate::error::{ApiError, ApiResult};
use crate::protocol::{
    single_save_fields, ActionReply, ActionResponse, DatabaseStats, SaveAllBeatsRequest,
    UploadResponse, DATABASE_STATS_PATH, RESET_DATABASE_PATH, SAVE_ALL_BEATS_PATH,
    UPDATE_DATABASE_PATH, UPLOAD_BUNDLE_IMAGE_PATH,
};

// =============================================================================
// Backend Port
// =============================================================================

/// Everything the admin console asks of the server.
///
/// The console is generic over this trait so commands can be tested
/// against an in-memory fake.
pub trait AdminBackend: Send + Sync {
    /// Saves one beat through the classic form endpoint.
    fn save_beat(&self, beat: &Beat) -> impl Future<Output = ApiResult<()>> + Send;

    /// Saves every beat in one request.
    fn save_all_beats(&self, beats: &[Beat]) -> impl Future<Output = ApiResult<ActionReply>> + Send;

    /// Uploads a bundle image, asking the server to drop `previous_key`.
    fn upload_bundle_image(
        &self,
        upload: &ImageUpload,
        previous_key: Option<&str>,
    ) -> impl Future<Output = ApiResult<BundleImage>> + Send;

    /// Re-imports the catalogue on the server.
    fn update_database(&self) -> impl Future<Output = ApiResult<ActionReply>> + Send;

    /// Wipes and rebuilds the server database.
    fn reset_database(&self) -> impl Future<Output = ApiResult<ActionReply>> + Send;

    /// Fetches the maintenance counters.
    fn database_stats(&self) -> impl Future<Output = ApiResult<DatabaseStats>> + Send;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// HTTP client for the admin server.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base: Url,
    form_path: String,
}

impl AdminClient {
    /// Validates `config` and builds the underlying HTTP client.
    pub fn new(config: &ApiConfig) -> ApiResult<Self> {
        config.validate()?;
        let http = create_http_client(&config.http())?;
        Ok(Self::with_client(http, config.base()?, &config.form_path))
    }

    /// Wraps an existing client (shared connection pool, custom TLS, ...).
    pub fn with_client(http: Client, base: Url, form_path: &str) -> Self {
        AdminClient {
            http,
            base,
            form_path: form_path.to_string(),
        }
    }

    /// Base URL every endpoint is joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> ApiResult<Url> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    async fn post_action(&self, path: &str) -> ApiResult<ActionReply> {
        let url = self.endpoint(path)?;
        debug!(%url, "POST admin action");

        let response = self.http.post(url).send().await?;
        let (status, body) = decode::<ActionResponse>(response).await?;
        body.into_result(Some(status))
    }

    async fn save_beat_impl(&self, beat: &Beat) -> ApiResult<()> {
        let url = self.endpoint(&self.form_path)?;
        debug!(%url, beat_id = beat.id, "POST single beat form");

        let form = single_save_fields(beat)
            .into_iter()
            .fold(Form::new(), |form, (name, value)| form.text(name, value));

        let response = self.http.post(url).multipart(form).send().await?;
        ensure_success(response).await?;

        info!(beat_id = beat.id, "Beat saved");
        Ok(())
    }

    async fn save_all_impl(&self, beats: &[Beat]) -> ApiResult<ActionReply> {
        let url = self.endpoint(SAVE_ALL_BEATS_PATH)?;
        debug!(%url, count = beats.len(), "POST save-all-beats");

        let request = SaveAllBeatsRequest::new(beats);
        let response = self.http.post(url).json(&request).send().await?;
        let (status, body) = decode::<ActionResponse>(response).await?;
        let reply = body.into_result(Some(status))?;

        info!(count = beats.len(), "All beats saved");
        Ok(reply)
    }

    async fn upload_impl(
        &self,
        upload: &ImageUpload,
        previous_key: Option<&str>,
    ) -> ApiResult<BundleImage> {
        let url = self.endpoint(UPLOAD_BUNDLE_IMAGE_PATH)?;
        debug!(%url, size = upload.size(), file = %upload.file_name, "POST bundle image");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid content type: {e}")))?;

        let mut form = Form::new().part("image", part);
        if let Some(key) = previous_key.filter(|k| !k.is_empty()) {
            form = form.text("previous_image_key", key.to_string());
        }

        let response = self.http.post(url).multipart(form).send().await?;
        let (status, body) = decode::<UploadResponse>(response).await?;
        let image = body.into_result(Some(status))?;

        info!(image_key = %image.image_key, "Bundle image uploaded");
        Ok(image)
    }

    async fn stats_impl(&self) -> ApiResult<DatabaseStats> {
        let url = self.endpoint(DATABASE_STATS_PATH)?;
        debug!(%url, "GET database stats");

        let response = self.http.get(url).send().await?;
        let (_, stats) = decode::<DatabaseStats>(response).await?;
        Ok(stats)
    }
}

impl AdminBackend for AdminClient {
    async fn save_beat(&self, beat: &Beat) -> ApiResult<()> {
        self.save_beat_impl(beat).await
    }

    async fn save_all_beats(&self, beats: &[Beat]) -> ApiResult<ActionReply> {
        self.save_all_impl(beats).await
    }

    async fn upload_bundle_image(
        &self,
        upload: &ImageUpload,
        previous_key: Option<&str>,
    ) -> ApiResult<BundleImage> {
        self.upload_impl(upload, previous_key).await
    }

    async fn update_database(&self) -> ApiResult<ActionReply> {
        self.post_action(UPDATE_DATABASE_PATH).await
    }

    async fn reset_database(&self) -> ApiResult<ActionReply> {
        self.post_action(RESET_DATABASE_PATH).await
    }

    async fn database_stats(&self) -> ApiResult<DatabaseStats> {
        self.stats_impl().await
    }
}

// =============================================================================
// Response Handling
// =============================================================================

/// Turns a non-2xx response into [`ApiError::Server`], keeping the
/// server's `error` text when the body carries one.
async fn ensure_success(response: Response) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let (message, details) = match serde_json::from_str::<ActionResponse>(&text) {
        Ok(body) => match body.error.or(body.message) {
            Some(message) => (message, body.details),
            None => (format!("HTTP {status}"), body.details),
        },
        Err(_) => (format!("HTTP {status}"), Vec::new()),
    };

    debug!(status = status.as_u16(), %message, "Server rejected request");
    Err(ApiError::server(Some(status.as_u16()), message, details))
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<(u16, T)> {
    let response = ensure_success(response).await?;
    let status = response.status().as_u16();
    let body = response.bytes().await?;
    let value = serde_json::from_slice(&body)?;
    Ok((status, value))
}
