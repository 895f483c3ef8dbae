//! # Wire Protocol
//!
//! Request and response bodies of the admin endpoints.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                        Body              Response         │
//! │  ──────  ──────────────────────────  ────────────────  ───────────────  │
//! │  POST    /api/save-all-beats         JSON beats[]      ActionResponse   │
//! │  POST    <form_path>                 multipart fields  any 2xx          │
//! │  POST    /api/upload-bundle-image    multipart image   UploadResponse   │
//! │  POST    /admin/update-database      (empty)           ActionResponse   │
//! │  POST    /admin/reset-database       (empty)           ActionResponse   │
//! │  GET     /admin/database-stats       -                 DatabaseStats    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Money is integer cents everywhere else in the workspace. The server
//! expects euros as JSON numbers, so the conversion happens here and only
//! here.

use beat_core::{Beat, BundleImage, Money};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ApiError, ApiResult};

pub const SAVE_ALL_BEATS_PATH: &str = "api/save-all-beats";
pub const UPLOAD_BUNDLE_IMAGE_PATH: &str = "api/upload-bundle-image";
pub const UPDATE_DATABASE_PATH: &str = "admin/update-database";
pub const RESET_DATABASE_PATH: &str = "admin/reset-database";
pub const DATABASE_STATS_PATH: &str = "admin/database-stats";

/// Used when the server says `success: false` without an `error`.
const UNKNOWN_SERVER_ERROR: &str = "Unknown server error";

// =============================================================================
// Bulk Save
// =============================================================================

/// One beat as the bulk-save endpoint expects it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeatPayload {
    pub id: i64,
    pub original_price: f64,
    pub discounted_price: f64,
    pub is_exclusive: u8,
    pub is_discounted: u8,
    pub discount_percent: i64,
}

impl From<&Beat> for BeatPayload {
    fn from(beat: &Beat) -> Self {
        BeatPayload {
            id: beat.id,
            original_price: to_euros(beat.pricing.original_price),
            discounted_price: to_euros(beat.pricing.discounted_price),
            is_exclusive: flag(beat.is_exclusive),
            is_discounted: flag(beat.pricing.is_discounted),
            discount_percent: beat.pricing.discount_percent,
        }
    }
}

/// Body of `POST /api/save-all-beats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveAllBeatsRequest {
    pub beats: Vec<BeatPayload>,
}

impl SaveAllBeatsRequest {
    pub fn new(beats: &[Beat]) -> Self {
        SaveAllBeatsRequest {
            beats: beats.iter().map(BeatPayload::from).collect(),
        }
    }
}

// =============================================================================
// Single Save
// =============================================================================

/// Form fields for saving one beat, suffixed with its id.
///
/// ## Example
/// ```rust
/// use beat_api::protocol::single_save_fields;
/// use beat_core::{Beat, Money};
///
/// let fields = single_save_fields(&Beat::new(7, "Night Drive", Money::from_cents(1999)));
/// assert_eq!(fields[0], ("original_price_7".to_string(), "19.99".to_string()));
/// assert_eq!(fields[1], ("discounted_price_7".to_string(), String::new()));
/// ```
pub fn single_save_fields(beat: &Beat) -> Vec<(String, String)> {
    let id = beat.id;
    let pricing = &beat.pricing;

    let discounted = if pricing.discounted_price.is_zero() {
        String::new()
    } else {
        pricing.discounted_price.to_decimal_string()
    };

    vec![
        (format!("original_price_{id}"), pricing.original_price.to_decimal_string()),
        (format!("discounted_price_{id}"), discounted),
        (format!("is_exclusive_{id}"), flag(beat.is_exclusive).to_string()),
        (format!("is_discounted_{id}"), flag(pricing.is_discounted).to_string()),
        (format!("discount_percent_{id}"), pricing.discount_percent.to_string()),
    ]
}

// =============================================================================
// Responses
// =============================================================================

/// Envelope shared by bulk save and the maintenance actions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    pub details: Vec<String>,
}

/// What a successful action reported back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionReply {
    pub message: Option<String>,
    pub details: Vec<String>,
}

impl ActionResponse {
    /// Splits the envelope into a reply or a server rejection.
    pub fn into_result(self, status: Option<u16>) -> ApiResult<ActionReply> {
        if self.success {
            return Ok(ActionReply {
                message: self.message,
                details: self.details,
            });
        }

        let message = self
            .error
            .or(self.message)
            .unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
        Err(ApiError::server(status, message, self.details))
    }
}

/// Body returned by `POST /api/upload-bundle-image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub image_key: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn into_result(self, status: Option<u16>) -> ApiResult<BundleImage> {
        if !self.success {
            let message = self.error.unwrap_or_else(|| UNKNOWN_SERVER_ERROR.to_string());
            return Err(ApiError::server(status, message, Vec::new()));
        }

        match (self.image_key, self.image_url) {
            (Some(image_key), Some(image_url)) => Ok(BundleImage { image_key, image_url }),
            _ => Err(ApiError::InvalidResponse(
                "upload succeeded without image_key and image_url".to_string(),
            )),
        }
    }
}

/// Counters shown on the maintenance page. Missing counters read as 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseStats {
    #[serde(default)]
    pub total_beats: u64,
    #[serde(default)]
    pub exclusive_beats: u64,
    #[serde(default)]
    pub active_bundles: u64,
    #[serde(default)]
    pub sold_exclusive_count: u64,
}

// =============================================================================
// Helpers
// =============================================================================

fn to_euros(money: Money) -> f64 {
    money.cents() as f64 / 100.0
}

fn flag(value: bool) -> u8 {
    u8::from(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// `details` arrives as a list, a single string, or `null`.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(OneOrMany::One(detail)) if detail.trim().is_empty() => Vec::new(),
        Some(OneOrMany::One(detail)) => vec![detail],
        Some(OneOrMany::Many(details)) => details,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use beat_core::PricedItem;
    use serde_json::{json, Value};

    fn discounted_beat() -> Beat {
        Beat {
            id: 4,
            title: "Rain".to_string(),
            is_exclusive: true,
            pricing: PricedItem::discounted(Money::from_cents(2999), 30),
        }
    }

    #[test]
    fn test_bulk_payload_shape() {
        let body = serde_json::to_value(SaveAllBeatsRequest::new(&[discounted_beat()])).unwrap();
        assert_eq!(
            body,
            json!({
                "beats": [{
                    "id": 4,
                    "original_price": 29.99,
                    "discounted_price": 20.99,
                    "is_exclusive": 1,
                    "is_discounted": 1,
                    "discount_percent": 30
                }]
            })
        );
    }

    #[test]
    fn test_single_save_fields() {
        let fields = single_save_fields(&discounted_beat());
        let expected = [
            ("original_price_4", "29.99"),
            ("discounted_price_4", "20.99"),
            ("is_exclusive_4", "1"),
            ("is_discounted_4", "1"),
            ("discount_percent_4", "30"),
        ];
        for ((name, value), (want_name, want_value)) in fields.iter().zip(expected) {
            assert_eq!(name, want_name);
            assert_eq!(value, want_value);
        }
    }

    #[test]
    fn test_action_response_rejection() {
        let response: ActionResponse = serde_json::from_value(json!({
            "success": false,
            "error": "2 beats failed",
            "details": ["Beat 1: bad price", "Beat 2: bad price"]
        }))
        .unwrap();

        let err = response.into_result(Some(200)).unwrap_err();
        assert_eq!(err.to_string(), "2 beats failed");
        assert_eq!(err.details().len(), 2);
    }

    #[test]
    fn test_action_response_success_without_message() {
        let response: ActionResponse = serde_json::from_value(json!({ "success": true })).unwrap();
        assert_eq!(response.into_result(None).unwrap(), ActionReply::default());
    }

    #[test]
    fn test_action_details_accept_string_and_null() {
        let decode = |details: Value| -> ActionResponse {
            serde_json::from_value(json!({ "success": true, "details": details })).unwrap()
        };

        assert_eq!(decode(json!("12 beats imported")).details, vec!["12 beats imported"]);
        assert!(decode(Value::Null).details.is_empty());
        assert!(decode(json!("")).details.is_empty());
    }

    #[test]
    fn test_upload_response_requires_key_and_url() {
        let partial = UploadResponse {
            success: true,
            image_key: Some("bundles/a.png".to_string()),
            ..Default::default()
        };
        assert!(matches!(partial.into_result(None), Err(ApiError::InvalidResponse(_))));
    }

    #[test]
    fn test_stats_missing_counters_default_to_zero() {
        let stats: DatabaseStats = serde_json::from_value(json!({ "total_beats": 12 })).unwrap();
        assert_eq!(stats.total_beats, 12);
        assert_eq!(stats.sold_exclusive_count, 0);
    }
}
