//! # Money Module
//!
//! Provides the `Money` type for handling beat prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In the browser form:                                                   │
//! │    19.99 * (1 - 15/100) = 16.991499999999998                            │
//! │    Math.round(1699.1499999999998) / 100 = 16.99                         │
//! │                                                                         │
//! │  Whether a half-cent rounds up depends on float noise, so the price    │
//! │  computed from a percentage can disagree with the percentage computed  │
//! │  back from the price.                                                   │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    1999 cents × 85 / 100 = 1699.15 → 1699 cents, exactly, every time   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use beat_core::money::Money;
//!
//! // Create from cents (preferred)
//! let price = Money::from_cents(1999); // €19.99
//!
//! // Parse what the admin typed into a price field
//! let typed = Money::parse("original_price", "19,99").unwrap();
//! assert_eq!(typed, price);
//!
//! // 25% off, rounded half-up to the cent
//! assert_eq!(price.remaining_after_percent(25).cents(), 1499);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Sub;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::ValidationResult;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a price in the smallest currency unit (euro cents).
///
/// ## Design Decisions
/// - **i64 (signed)**: A typed-in negative price must be representable so
///   validation can reject it
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support; serializes as the raw cent count
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  form text "19.99" ──► Money::parse ──► PricedItem.original_price       │
/// │                                               │                         │
/// │                        discount percent ──────┤                         │
/// │                                               ▼                         │
/// │                              remaining_after_percent ──► discounted     │
/// │                                                                         │
/// │  PricedItem ──► wire payload (decimal number) ──► admin server          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use beat_core::money::Money;
    ///
    /// let price = Money::from_cents(1999); // Represents €19.99
    /// assert_eq!(price.cents(), 1999);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion, truncated toward zero.
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns what is left of this amount after taking `percent` off,
    /// rounded half-up to the cent.
    ///
    /// ## Implementation
    /// `round(cents × (100 − percent) / 100)` in i128 integer math.
    /// Rounding applies to the *remaining* amount, not to the discount,
    /// so €0.01 at 50% off stays €0.01.
    ///
    /// ## Example
    /// ```rust
    /// use beat_core::money::Money;
    ///
    /// let price = Money::from_cents(10000); // €100.00
    /// assert_eq!(price.remaining_after_percent(25).cents(), 7500);
    ///
    /// // €19.99 at 15% off = €16.9915 → €16.99
    /// assert_eq!(Money::from_cents(1999).remaining_after_percent(15).cents(), 1699);
    /// ```
    pub fn remaining_after_percent(&self, percent: i64) -> Money {
        let scaled = self.0 as i128 * (100 - percent as i128);
        Money::from_cents(div_round_half_up(scaled, 100) as i64)
    }

    /// Parses a price typed into a form field.
    ///
    /// ## Rules
    /// - Blank text is an empty field and reads as zero (the form treats a
    ///   missing number the same way)
    /// - `.` or `,` separates the fraction
    /// - A leading `-` is accepted so the value can be rejected later as
    ///   non-positive rather than as garbage
    /// - Digits beyond the cent are rounded half-up
    ///
    /// ## Example
    /// ```rust
    /// use beat_core::money::Money;
    ///
    /// assert_eq!(Money::parse("price", "19.99").unwrap().cents(), 1999);
    /// assert_eq!(Money::parse("price", "20").unwrap().cents(), 2000);
    /// assert_eq!(Money::parse("price", "").unwrap(), Money::zero());
    /// assert_eq!(Money::parse("price", "9.995").unwrap().cents(), 1000);
    /// assert!(Money::parse("price", "abc").is_err());
    /// ```
    pub fn parse(field: &str, text: &str) -> ValidationResult<Money> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Money::zero());
        }

        let invalid = || ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number with at most 2 decimals".to_string(),
        };

        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match unsigned.find(['.', ',']) {
            Some(pos) => (&unsigned[..pos], &unsigned[pos + 1..]),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        let digits_only = |part: &str| part.chars().all(|c| c.is_ascii_digit());
        if !digits_only(whole) || !digits_only(fraction) {
            return Err(invalid());
        }
        // 15 digits of euros is far beyond any price and keeps i64 safe.
        if whole.len() > 15 {
            return Err(invalid());
        }

        let whole_cents = if whole.is_empty() {
            0
        } else {
            whole.parse::<i64>().map_err(|_| invalid())? * 100
        };

        let mut digits = fraction.bytes().map(|b| (b - b'0') as i64);
        let tenths = digits.next().unwrap_or(0);
        let hundredths = digits.next().unwrap_or(0);
        let round_up = digits.next().map(|d| d >= 5).unwrap_or(false);

        let mut cents = whole_cents + tenths * 10 + hundredths;
        if round_up {
            cents += 1;
        }

        Ok(Money::from_cents(if negative { -cents } else { cents }))
    }

    /// Formats the value the way a price input shows it: `"19.99"`.
    pub fn to_decimal_string(&self) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

/// Integer division rounding halves away from zero.
///
/// `divisor` must be positive.
pub(crate) fn div_round_half_up(dividend: i128, divisor: i128) -> i128 {
    debug_assert!(divisor > 0);
    if dividend >= 0 {
        (2 * dividend + divisor) / (2 * divisor)
    } else {
        -((-2 * dividend + divisor) / (2 * divisor))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money with the euro sign.
///
/// ## Note
/// This is for logs and the terminal front end. The panel itself formats
/// prices without a symbol (see [`Money::to_decimal_string`]).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.major().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1999);
        assert_eq!(money.cents(), 1999);
        assert_eq!(money.major(), 19);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1999)), "€19.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "€5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-€5.50");
        assert_eq!(format!("{}", Money::zero()), "€0.00");
    }

    #[test]
    fn test_decimal_string() {
        assert_eq!(Money::from_cents(7500).to_decimal_string(), "75.00");
        assert_eq!(Money::from_cents(5).to_decimal_string(), "0.05");
        assert_eq!(Money::from_cents(-5).to_decimal_string(), "-0.05");
    }

    #[test]
    fn test_savings_subtraction() {
        let saved = Money::from_cents(1999) - Money::from_cents(1499);
        assert_eq!(saved.cents(), 500);
        assert!((Money::from_cents(250) - Money::from_cents(1000)).is_negative());
    }

    #[test]
    fn test_remaining_after_percent() {
        assert_eq!(Money::from_cents(10000).remaining_after_percent(25).cents(), 7500);
        assert_eq!(Money::from_cents(10000).remaining_after_percent(0).cents(), 10000);
        assert_eq!(Money::from_cents(10000).remaining_after_percent(100).cents(), 0);
    }

    /// The half-cent goes up on the remaining price.
    #[test]
    fn test_remaining_after_percent_rounds_half_up() {
        // 1 cent at 50% = 0.5 cent → 1 cent
        assert_eq!(Money::from_cents(1).remaining_after_percent(50).cents(), 1);
        // €9.99 at 50% = €4.995 → €5.00
        assert_eq!(Money::from_cents(999).remaining_after_percent(50).cents(), 500);
        // €9.99 at 25% = €7.4925 → €7.49
        assert_eq!(Money::from_cents(999).remaining_after_percent(25).cents(), 749);
    }

    #[test]
    fn test_parse_accepts_form_input() {
        assert_eq!(Money::parse("p", "19.99").unwrap().cents(), 1999);
        assert_eq!(Money::parse("p", "19,99").unwrap().cents(), 1999);
        assert_eq!(Money::parse("p", " 20 ").unwrap().cents(), 2000);
        assert_eq!(Money::parse("p", "0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse("p", ".5").unwrap().cents(), 50);
        assert_eq!(Money::parse("p", "5.").unwrap().cents(), 500);
        assert_eq!(Money::parse("p", "-3.10").unwrap().cents(), -310);
        assert_eq!(Money::parse("p", "").unwrap(), Money::zero());
    }

    #[test]
    fn test_parse_rounds_extra_digits() {
        assert_eq!(Money::parse("p", "1.994").unwrap().cents(), 199);
        assert_eq!(Money::parse("p", "1.995").unwrap().cents(), 200);
        assert_eq!(Money::parse("p", "-1.995").unwrap().cents(), -200);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for text in ["abc", "1.2.3", "--1", "1e3", ".", "-", "12 34"] {
            let err = Money::parse("original_price", text).unwrap_err();
            assert!(
                matches!(
                    err,
                    ValidationError::InvalidFormat { ref field, .. } if field == "original_price"
                ),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_div_round_half_up() {
        assert_eq!(div_round_half_up(5, 10), 1);
        assert_eq!(div_round_half_up(4, 10), 0);
        assert_eq!(div_round_half_up(-5, 10), -1);
        assert_eq!(div_round_half_up(-4, 10), 0);
        assert_eq!(div_round_half_up(150, 100), 2);
    }
}
