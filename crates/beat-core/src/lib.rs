//! # beat-core: Pure Business Logic for Beat Admin
//!
//! This crate is the **heart** of Beat Admin. It contains the pricing logic
//! of the admin panel as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Beat Admin Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 admin-console (presentation)                    │   │
//! │  │   BeatEditor ──► Notifications ──► ErrorDisplay ──► Loading     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ beat-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ discount  │  │ validation│  │   │
//! │  │   │   Beat    │  │   Money   │  │  + edit   │  │   bulk    │  │   │
//! │  │   │PricedItem │  │  parsing  │  │ auto-calc │  │  uploads  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO LOGGING • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 beat-api (HTTP client)                          │   │
//! │  │       save-all-beats, upload-bundle-image, maintenance          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Beat, PricedItem, BundleImage, ImageUpload)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`discount`] - Price ↔ percentage calculation and pricing rules
//! - [`edit`] - Field edits and the auto-calculation they trigger
//! - [`error`] - Domain error types
//! - [`validation`] - Bulk and field validation
//!
//! ## Example Usage
//!
//! ```rust
//! use beat_core::discount::{percent_from_prices, price_from_percent};
//! use beat_core::Money;
//!
//! let original = Money::from_cents(10000); // €100.00
//! let discounted = price_from_percent(original, 25);
//! assert_eq!(discounted.cents(), 7500);
//! assert_eq!(percent_from_prices(original, discounted), 25);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod discount;
pub mod edit;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use edit::{EditOutcome, EditRejection, FieldEdit};
pub use error::{CoreError, CoreResult, ErrorKind, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Smallest discount percentage a discounted item may carry.
pub const MIN_DISCOUNT_PERCENT: i64 = 1;

/// Largest discount percentage a discounted item may carry.
pub const MAX_DISCOUNT_PERCENT: i64 = 99;

/// Upload limit for bundle images (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;
