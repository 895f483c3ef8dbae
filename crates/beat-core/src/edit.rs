//! # Field Edits
//!
//! What happens to a [`PricedItem`] when the admin changes one field.
//!
//! ## Auto-Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Edit                     Follow-up                                     │
//! │  ───────────────────────  ───────────────────────────────────────────   │
//! │  original price           discounted price ← price_from_percent        │
//! │  discount percent         discounted price ← price_from_percent        │
//! │  discounted price         discount percent ← percent_from_prices       │
//! │  "discounted" unticked    discounted price, percent ← 0                │
//! │  "discounted" ticked      discounted price ← price_from_percent        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The calculation only runs while the item is discounted, the original
//! price is positive and the percentage is within 1..=99; otherwise the
//! edited field is stored as typed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::discount::{percent_from_prices, price_from_percent};
use crate::error::ErrorKind;
use crate::money::Money;
use crate::types::PricedItem;
use crate::{MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT};

/// A change to exactly one pricing field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldEdit {
    OriginalPrice(Money),
    DiscountPercent(i64),
    DiscountedPrice(Money),
    Discounted(bool),
}

/// Why an edit was refused. The item is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditRejection {
    /// A discounted price was typed while the item is not discounted.
    #[error("Tick 'Discounted' before entering a discounted price")]
    DiscountNotEnabled,
}

/// Result of applying a [`FieldEdit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Stored, with any follow-up calculation done.
    Applied,
    /// Stored, but the value breaks a pricing rule the admin should see now.
    Flagged(ErrorKind),
    /// Not stored.
    Rejected(EditRejection),
}

impl PricedItem {
    /// Applies one field edit and the auto-calculation it triggers.
    ///
    /// ## Example
    /// ```rust
    /// use beat_core::{EditOutcome, FieldEdit, Money, PricedItem};
    ///
    /// let mut item = PricedItem::full_price(Money::from_cents(10000));
    /// item.apply(FieldEdit::Discounted(true));
    /// item.apply(FieldEdit::DiscountPercent(25));
    /// assert_eq!(item.discounted_price.cents(), 7500);
    ///
    /// let outcome = item.apply(FieldEdit::DiscountedPrice(Money::from_cents(6000)));
    /// assert_eq!(outcome, EditOutcome::Applied);
    /// assert_eq!(item.discount_percent, 40);
    /// ```
    pub fn apply(&mut self, edit: FieldEdit) -> EditOutcome {
        match edit {
            FieldEdit::OriginalPrice(price) => {
                self.original_price = price;
                self.recalculate_discounted_price();
                EditOutcome::Applied
            }
            FieldEdit::DiscountPercent(percent) => {
                self.discount_percent = percent;
                self.recalculate_discounted_price();
                EditOutcome::Applied
            }
            FieldEdit::DiscountedPrice(price) => self.apply_discounted_price(price),
            FieldEdit::Discounted(true) => {
                self.is_discounted = true;
                self.recalculate_discounted_price();
                EditOutcome::Applied
            }
            FieldEdit::Discounted(false) => {
                self.is_discounted = false;
                self.discounted_price = Money::zero();
                self.discount_percent = 0;
                EditOutcome::Applied
            }
        }
    }

    fn apply_discounted_price(&mut self, price: Money) -> EditOutcome {
        if !self.is_discounted {
            // Clearing the field of a non-discounted item is harmless.
            if price.is_zero() {
                return EditOutcome::Applied;
            }
            return EditOutcome::Rejected(EditRejection::DiscountNotEnabled);
        }

        if price.is_negative() {
            self.discounted_price = Money::zero();
            self.discount_percent = 0;
            return EditOutcome::Flagged(ErrorKind::DiscountedPriceMissingOrNonpositive);
        }

        self.discounted_price = price;

        if self.original_price.is_positive() && price >= self.original_price {
            self.discount_percent = 0;
            return EditOutcome::Flagged(ErrorKind::DiscountedNotLessThanOriginal);
        }

        self.discount_percent = percent_from_prices(self.original_price, price);
        EditOutcome::Applied
    }

    fn recalculate_discounted_price(&mut self) {
        let in_range =
            (MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT).contains(&self.discount_percent);
        if self.is_discounted && self.original_price.is_positive() && in_range {
            self.discounted_price = price_from_percent(self.original_price, self.discount_percent);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
