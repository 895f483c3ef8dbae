//! # Validation Module
//!
//! Input validation utilities for Beat Admin.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Field edit (edit.rs)                                          │
//! │  ├── Rejects discounted price while not discounted                     │
//! │  └── Flags the rule a single keystroke just broke                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Save (THIS MODULE)                                           │
//! │  ├── Every pricing rule on every beat, aggregated                      │
//! │  └── Upload constraints on the selected image                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Admin server                                                 │
//! │  └── Re-validates and reports failures as `details`                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beat_core::validation::validate_beats;
//! use beat_core::{Beat, Money};
//!
//! let beats = vec![
//!     Beat::new(1, "Sunset", Money::from_cents(1999)),
//!     Beat::new(2, "Broken", Money::zero()),
//! ];
//!
//! let report = validate_beats(&beats);
//! assert!(!report.is_clean());
//! assert_eq!(report.failures.len(), 1);
//! assert_eq!(report.failures[0].beat_id, 2);
//! ```

use crate::error::{ErrorKind, ValidationError};
use crate::types::{Beat, ImageUpload};
use crate::MAX_IMAGE_BYTES;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Bulk Validation
// =============================================================================

/// Pricing problems found on one beat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemFailure {
    pub beat_id: i64,
    pub label: String,
    /// Violations in rule order, never empty.
    pub errors: Vec<ErrorKind>,
}

/// Every pricing problem across a set of beats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkReport {
    /// Failing beats, in the order they were checked.
    pub failures: Vec<ItemFailure>,
}

impl BulkReport {
    /// True when nothing failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of rule violations.
    pub fn error_count(&self) -> usize {
        self.failures.iter().map(|f| f.errors.len()).sum()
    }

    /// Every violation as a user-facing message, beat by beat.
    pub fn messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(|f| f.errors.iter().map(ToString::to_string))
            .collect()
    }

    /// Like [`messages`](Self::messages), prefixed with the beat label.
    pub fn labelled_messages(&self) -> Vec<String> {
        self.failures
            .iter()
            .flat_map(|f| f.errors.iter().map(move |e| format!("{}: {}", f.label, e)))
            .collect()
    }
}

/// Validates pricing on every beat without stopping at the first failure.
pub fn validate_beats(beats: &[Beat]) -> BulkReport {
    let failures = beats
        .iter()
        .filter_map(|beat| {
            let errors = beat.pricing.validate();
            if errors.is_empty() {
                None
            } else {
                Some(ItemFailure {
                    beat_id: beat.id,
                    label: beat.label(),
                    errors,
                })
            }
        })
        .collect();

    BulkReport { failures }
}

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a beat identifier.
///
/// ## Rules
/// - Must be positive (database serial IDs start at 1)
pub fn validate_beat_id(id: i64) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a bundle image before it is uploaded.
///
/// ## Rules
/// - MIME type must start with `image/`
/// - At most 5 MiB
pub fn validate_image_upload(upload: &ImageUpload) -> ValidationResult<()> {
    if !upload.content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Err(ValidationError::UnsupportedType {
            field: "image".to_string(),
            expected: "an image".to_string(),
            actual: upload.content_type.clone(),
        });
    }

    if upload.size() > MAX_IMAGE_BYTES {
        return Err(ValidationError::TooLarge {
            field: "image".to_string(),
            size: upload.size(),
            max: MAX_IMAGE_BYTES,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
