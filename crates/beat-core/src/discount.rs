//! # Discount Calculator
//!
//! Keeps the three discount fields of a [`PricedItem`] consistent.
//!
//! ## The Two Directions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   admin types a percentage           admin types a price                │
//! │            │                                  │                         │
//! │            ▼                                  ▼                         │
//! │   price_from_percent(orig, pct)      percent_from_prices(orig, disc)    │
//! │   round2(orig × (1 − pct/100))       round(100 × (1 − disc/orig))       │
//! │            │                                  │                         │
//! │            └──────────────┬───────────────────┘                         │
//! │                           ▼                                             │
//! │              validate(item) → [ErrorKind]                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Going price → percent → price lands within one percentage point of where
//! it started for any original price of at least €1.00.

use crate::error::ErrorKind;
use crate::money::{div_round_half_up, Money};
use crate::types::PricedItem;
use crate::{MAX_DISCOUNT_PERCENT, MIN_DISCOUNT_PERCENT};

/// Whole-number percentage that `discounted` takes off `original`.
///
/// ## Rules
/// - `round(100 × (1 − discounted / original))`, half-up, never negative
/// - `0` when either price is non-positive or nothing is taken off
///
/// ## Example
/// ```rust
/// use beat_core::discount::percent_from_prices;
/// use beat_core::Money;
///
/// assert_eq!(percent_from_prices(Money::from_cents(10000), Money::from_cents(8000)), 20);
/// assert_eq!(percent_from_prices(Money::from_cents(1999), Money::from_cents(1499)), 25);
/// assert_eq!(percent_from_prices(Money::from_cents(10000), Money::from_cents(15000)), 0);
/// ```
pub fn percent_from_prices(original: Money, discounted: Money) -> i64 {
    if !original.is_positive() || !discounted.is_positive() || discounted >= original {
        return 0;
    }

    let taken_off = (original - discounted).cents() as i128;
    let percent = div_round_half_up(100 * taken_off, original.cents() as i128);
    percent.max(0) as i64
}

/// Price left after taking `percent` off `original`, rounded half-up to
/// the cent.
///
/// ## Rules
/// - `0` when `original` or `percent` is non-positive
///
/// ## Example
/// ```rust
/// use beat_core::discount::price_from_percent;
/// use beat_core::Money;
///
/// assert_eq!(price_from_percent(Money::from_cents(10000), 25), Money::from_cents(7500));
/// assert_eq!(price_from_percent(Money::zero(), 25), Money::zero());
/// ```
pub fn price_from_percent(original: Money, percent: i64) -> Money {
    if !original.is_positive() || percent <= 0 {
        return Money::zero();
    }
    original.remaining_after_percent(percent)
}

/// Reports every pricing rule `item` breaks, in fixed order.
///
/// ## Rules
/// 1. `OriginalPriceMissingOrNonpositive`: original ≤ 0
/// 2. `DiscountedPriceMissingOrNonpositive`: discounted ≤ 0 (discounted items only)
/// 3. `DiscountedNotLessThanOriginal`: discounted ≥ original (discounted items only)
/// 4. `DiscountPercentOutOfRange`: percent outside 1..=99 (discounted items only)
///
/// A negative discounted price is reported as rule 2, not a kind of its own.
///
/// ## Example
/// ```rust
/// use beat_core::discount::validate;
/// use beat_core::{ErrorKind, Money, PricedItem};
///
/// let item = PricedItem::full_price(Money::zero());
/// assert_eq!(validate(&item), vec![ErrorKind::OriginalPriceMissingOrNonpositive]);
/// ```
pub fn validate(item: &PricedItem) -> Vec<ErrorKind> {
    let mut errors = Vec::new();

    if !item.original_price.is_positive() {
        errors.push(ErrorKind::OriginalPriceMissingOrNonpositive);
    }

    if item.is_discounted {
        if !item.discounted_price.is_positive() {
            errors.push(ErrorKind::DiscountedPriceMissingOrNonpositive);
        }

        if item.discounted_price >= item.original_price {
            errors.push(ErrorKind::DiscountedNotLessThanOriginal);
        }

        if !(MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT).contains(&item.discount_percent) {
            errors.push(ErrorKind::DiscountPercentOutOfRange);
        }
    }

    errors
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn item(original: i64, is_discounted: bool, discounted: i64, percent: i64) -> PricedItem {
        PricedItem {
            original_price: Money::from_cents(original),
            is_discounted,
            discounted_price: Money::from_cents(discounted),
            discount_percent: percent,
        }
    }

    #[test]
    fn test_price_from_percent() {
        assert_eq!(price_from_percent(Money::from_cents(10000), 25).cents(), 7500);
        assert_eq!(price_from_percent(Money::zero(), 25), Money::zero());
        assert_eq!(price_from_percent(Money::from_cents(-100), 25), Money::zero());
        assert_eq!(price_from_percent(Money::from_cents(10000), 0), Money::zero());
        assert_eq!(price_from_percent(Money::from_cents(10000), -5), Money::zero());
    }

    #[test]
    fn test_percent_from_prices() {
        assert_eq!(percent_from_prices(Money::from_cents(10000), Money::from_cents(8000)), 20);
        // 1 - 16.99/19.99 = 15.007% → 15
        assert_eq!(percent_from_prices(Money::from_cents(1999), Money::from_cents(1699)), 15);
        // Exactly 12.5% rounds up
        assert_eq!(percent_from_prices(Money::from_cents(800), Money::from_cents(700)), 13);
    }

    #[test]
    fn test_percent_from_prices_guards() {
        let hundred = Money::from_cents(10000);
        assert_eq!(percent_from_prices(Money::zero(), Money::from_cents(50)), 0);
        assert_eq!(percent_from_prices(hundred, Money::zero()), 0);
        assert_eq!(percent_from_prices(hundred, Money::from_cents(-100)), 0);
        assert_eq!(percent_from_prices(hundred, hundred), 0);
        assert_eq!(percent_from_prices(hundred, Money::from_cents(15000)), 0);
    }

    /// price → percent → price stays within one point, for every percent
    /// and a spread of originals from €1.00 up.
    #[test]
    fn test_round_trip_within_one_percent() {
        let originals = (100..=2_000).step_by(7).chain([1999, 2999, 4999, 9999, 10000, 123_456]);
        for original in originals {
            let original = Money::from_cents(original);
            for percent in MIN_DISCOUNT_PERCENT..=MAX_DISCOUNT_PERCENT {
                let discounted = price_from_percent(original, percent);
                let back = percent_from_prices(original, discounted);
                assert!(
                    (back - percent).abs() <= 1,
                    "original {original}, percent {percent}: got {back} via {discounted}"
                );
            }
        }
    }

    #[test]
    fn test_validate_consistent_discount() {
        assert!(validate(&item(10000, true, 8000, 20)).is_empty());
    }

    #[test]
    fn test_validate_zero_original_not_discounted() {
        assert_eq!(
            validate(&item(0, false, 0, 0)),
            vec![ErrorKind::OriginalPriceMissingOrNonpositive]
        );
    }

    #[test]
    fn test_validate_discounted_above_original() {
        let errors = validate(&item(10000, true, 15000, 20));
        assert!(errors.contains(&ErrorKind::DiscountedNotLessThanOriginal));
    }

    #[test]
    fn test_validate_percent_out_of_range_only() {
        assert_eq!(
            validate(&item(10000, true, 5000, 150)),
            vec![ErrorKind::DiscountPercentOutOfRange]
        );
        assert_eq!(
            validate(&item(10000, true, 5000, 0)),
            vec![ErrorKind::DiscountPercentOutOfRange]
        );
        assert!(validate(&item(10000, true, 100, 99)).is_empty());
        assert!(validate(&item(10000, true, 9900, 1)).is_empty());
    }

    #[test]
    fn test_validate_negative_discounted_is_nonpositive() {
        assert_eq!(
            validate(&item(10000, true, -500, 20)),
            vec![ErrorKind::DiscountedPriceMissingOrNonpositive]
        );
    }

    #[test]
    fn test_validate_reports_in_fixed_order() {
        assert_eq!(
            validate(&item(0, true, 0, 0)),
            vec![
                ErrorKind::OriginalPriceMissingOrNonpositive,
                ErrorKind::DiscountedPriceMissingOrNonpositive,
                ErrorKind::DiscountedNotLessThanOriginal,
                ErrorKind::DiscountPercentOutOfRange,
            ]
        );
    }

    #[test]
    fn test_validate_ignores_discount_fields_when_not_discounted() {
        assert!(validate(&item(10000, false, 15000, 150)).is_empty());
    }
}
