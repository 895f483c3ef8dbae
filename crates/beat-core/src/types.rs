//! # Domain Types
//!
//! Core domain types used throughout Beat Admin.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌──────────────────────┐   ┌─────────────────┐   │
//! │  │      Beat       │   │     PricedItem       │   │  BundleImage    │   │
//! │  │  ─────────────  │   │  ──────────────────  │   │  ─────────────  │   │
//! │  │  id             │──►│  original_price      │   │  image_key      │   │
//! │  │  title          │   │  is_discounted       │   │  image_url      │   │
//! │  │  is_exclusive   │   │  discounted_price    │   └─────────────────┘   │
//! │  │  pricing        │   │  discount_percent    │                         │
//! │  └─────────────────┘   └──────────────────────┘   ┌─────────────────┐   │
//! │                                                   │  ImageUpload    │   │
//! │                                                   │  file selection │   │
//! │                                                   └─────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::discount;
use crate::error::ErrorKind;
use crate::money::Money;

// =============================================================================
// Priced Item
// =============================================================================

/// The pricing fields of one item, as the admin form holds them.
///
/// ## Invariant
/// When `is_discounted` is set and the item validates,
/// `discounted_price == price_from_percent(original_price, discount_percent)`
/// up to the rounding tolerance of the percentage.
///
/// When `is_discounted` is clear, `discounted_price` and `discount_percent`
/// are zero and never validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PricedItem {
    /// List price. Must be positive for an active item.
    pub original_price: Money,

    /// Gate for the two discount fields.
    pub is_discounted: bool,

    /// Price actually charged while discounted.
    pub discounted_price: Money,

    /// Whole-number percentage off, `1..=99` when discounted.
    pub discount_percent: i64,
}

impl PricedItem {
    /// An item sold at its list price.
    pub const fn full_price(original_price: Money) -> Self {
        PricedItem {
            original_price,
            is_discounted: false,
            discounted_price: Money::zero(),
            discount_percent: 0,
        }
    }

    /// An item discounted by `percent`, with the discounted price derived.
    ///
    /// ## Example
    /// ```rust
    /// use beat_core::{Money, PricedItem};
    ///
    /// let item = PricedItem::discounted(Money::from_cents(10000), 20);
    /// assert_eq!(item.discounted_price.cents(), 8000);
    /// assert!(item.validate().is_empty());
    /// ```
    pub fn discounted(original_price: Money, percent: i64) -> Self {
        PricedItem {
            original_price,
            is_discounted: true,
            discounted_price: discount::price_from_percent(original_price, percent),
            discount_percent: percent,
        }
    }

    /// Runs every pricing rule. See [`discount::validate`].
    pub fn validate(&self) -> Vec<ErrorKind> {
        discount::validate(self)
    }
}

// =============================================================================
// Beat
// =============================================================================

/// A priced digital item sold through the admin panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Beat {
    /// Server-assigned identifier.
    pub id: i64,

    /// Display title (informational; the admin panel does not edit it).
    #[serde(default)]
    pub title: String,

    /// Sold with exclusive rights.
    #[serde(default)]
    pub is_exclusive: bool,

    /// Pricing fields.
    #[serde(flatten)]
    pub pricing: PricedItem,
}

impl Beat {
    /// Creates a beat at full price.
    pub fn new(id: i64, title: impl Into<String>, original_price: Money) -> Self {
        Beat {
            id,
            title: title.into(),
            is_exclusive: false,
            pricing: PricedItem::full_price(original_price),
        }
    }

    /// Label used in messages: the title when known, `#id` otherwise.
    pub fn label(&self) -> String {
        if self.title.trim().is_empty() {
            format!("#{}", self.id)
        } else {
            self.title.clone()
        }
    }
}

// =============================================================================
// Bundle Image
// =============================================================================

/// The image currently attached to the bundle being edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BundleImage {
    /// Storage key, sent back as `previous_image_key` on replacement.
    pub image_key: String,

    /// Public URL for the preview.
    pub image_url: String,
}

// =============================================================================
// Image Upload
// =============================================================================

/// A file the admin picked for a bundle image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    /// MIME type as reported by the picker (e.g. `image/png`).
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        ImageUpload {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Size of the payload in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
