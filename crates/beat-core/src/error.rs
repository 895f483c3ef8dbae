//! # Error Types
//!
//! Domain-specific error types for beat-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  beat-core errors (this file)                                           │
//! │  ├── ErrorKind        - The four pricing rule violations               │
//! │  ├── ValidationError  - Field input validation failures                │
//! │  └── CoreError        - General domain errors                          │
//! │                                                                         │
//! │  beat-api errors (separate crate)                                      │
//! │  └── ApiError         - Network and server failures                    │
//! │                                                                         │
//! │  Flow: ErrorKind / ValidationError / ApiError → console notification   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, beat ID, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Pricing Error Kind
// =============================================================================

/// A violated pricing rule on a single item.
///
/// ## Ordering
/// [`crate::discount::validate`] reports these in declaration order, so
/// the first element of a result is always the most fundamental problem.
///
/// ## Wire Names
/// Serialized as snake_case so the front end can key translations off them:
/// `"original_price_missing_or_nonpositive"`, ...
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum ErrorKind {
    /// Original price is zero, negative, or was left empty.
    #[error("Original price must be greater than 0")]
    OriginalPriceMissingOrNonpositive,

    /// Discounted price is zero, negative, or was left empty.
    #[error("Discounted price must be greater than 0")]
    DiscountedPriceMissingOrNonpositive,

    /// Discounted price does not undercut the original.
    #[error("Discounted price must be lower than the original price")]
    DiscountedNotLessThanOriginal,

    /// Discount percentage outside `[1, 99]`.
    #[error("Discount percentage must be between 1 and 99")]
    DiscountPercentOutOfRange,
}

impl ErrorKind {
    /// Returns true for the rules that only apply to discounted items.
    pub const fn is_discount_related(&self) -> bool {
        !matches!(self, ErrorKind::OriginalPriceMissingOrNonpositive)
    }
}

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Beat is not part of the loaded form state.
    #[error("Beat not found: {0}")]
    BeatNotFound(i64),

    /// The same beat ID appeared twice in one load.
    #[error("Duplicate beat ID: {0}")]
    DuplicateBeat(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when form input or a selected file does not meet
/// requirements. Pricing consistency is reported through [`ErrorKind`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Content type is not an accepted kind.
    #[error("{field} must be {expected}, got {actual}")]
    UnsupportedType {
        field: String,
        expected: String,
        actual: String,
    },

    /// Payload larger than allowed.
    #[error("{field} is {size} bytes, maximum is {max} bytes")]
    TooLarge { field: String, size: usize, max: usize },

    /// A pricing rule violation (wraps ErrorKind).
    #[error(transparent)]
    Pricing(#[from] ErrorKind),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
