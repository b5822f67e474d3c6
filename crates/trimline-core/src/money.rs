//! # Money Module
//!
//! Provides the `Money` type for catalog prices, discounts and totals.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  PRICES ARE WHOLE WON                                                   │
//! │                                                                         │
//! │  Every catalog price is a precomputed integer in the base unit.         │
//! │  Quotes only ever add and subtract:                                     │
//! │                                                                         │
//! │    base + trim + exterior + interior + wheels + options − tax benefit   │
//! │                                                                         │
//! │  No division, no rounding, no floating point anywhere.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trimline_core::money::Money;
//!
//! let base = Money::parse_grouped("50,000,000").unwrap_or_default();
//! let total = base + Money::from_won(400_000) - Money::from_won(1_000_000);
//! assert_eq!(total.won(), 49_400_000);
//! assert_eq!(total.to_string(), "49,400,000원");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};
use ts_rs::TS;

/// Display suffix for the base currency unit.
pub const CURRENCY_SUFFIX: &str = "원";

/// Largest single price a catalog may carry (10 trillion won).
///
/// Sums of catalog prices stay far inside `i64` below this bound.
pub const MAX_PRICE: i64 = 10_000_000_000_000;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: the stored tax-benefit discount is negative, and a
///   total may go below zero with adversarial catalog data (never clamped)
/// - **Single field tuple struct**: serializes as a bare JSON integer
/// - **Saturating arithmetic**: a sum that would leave `i64` pins at the
///   bound instead of panicking
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in won.
    #[inline]
    pub const fn won(&self) -> i64 {
        self.0
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

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Parses a comma-grouped decimal string such as `"50,000,000"`.
    ///
    /// ## Rules
    /// - Grouping commas are removed first
    /// - Leading/trailing whitespace is ignored
    /// - Leading digits are read up to the first non-digit, so a trailing
    ///   unit (`"39,950,000원"`) is tolerated
    /// - No digits at all → `None`
    ///
    /// ## Example
    /// ```rust
    /// use trimline_core::money::Money;
    ///
    /// assert_eq!(Money::parse_grouped("50,000,000"), Some(Money::from_won(50_000_000)));
    /// assert_eq!(Money::parse_grouped("39,950,000원"), Some(Money::from_won(39_950_000)));
    /// assert_eq!(Money::parse_grouped("call us"), None);
    /// ```
    pub fn parse_grouped(text: &str) -> Option<Money> {
        let cleaned: String = text.chars().filter(|c| *c != ',').collect();
        let cleaned = cleaned.trim();

        let (negative, digits) = match cleaned.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, cleaned.strip_prefix('+').unwrap_or(cleaned)),
        };

        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let value: i64 = digits[..end].parse().ok()?;

        Some(Money(if negative { -value } else { value }))
    }

    /// Formats the absolute value with comma grouping, without a suffix.
    ///
    /// ## Example
    /// ```rust
    /// use trimline_core::money::Money;
    ///
    /// assert_eq!(Money::from_won(1234567).grouped(), "1,234,567");
    /// assert_eq!(Money::from_won(999).grouped(), "999");
    /// ```
    pub fn grouped(&self) -> String {
        let digits = self.0.unsigned_abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);

        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }

        out
    }

    /// Returns the label appended to a choice name in summaries.
    ///
    /// Free items get no label; priced items get ` (+1,234,000원)`.
    ///
    /// ## Example
    /// ```rust
    /// use trimline_core::money::Money;
    ///
    /// assert_eq!(Money::zero().price_label(), "");
    /// assert_eq!(Money::from_won(100_000).price_label(), " (+100,000원)");
    /// ```
    pub fn price_label(&self) -> String {
        if self.0 > 0 {
            format!(" (+{}{})", self.grouped(), CURRENCY_SUFFIX)
        } else {
            String::new()
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display uses comma grouping and the won suffix: `1,234,000원`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}{}", sign, self.grouped(), CURRENCY_SUFFIX)
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Negation, used for the signed discount line of a quote.
impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(self.0.saturating_neg())
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_grouped() {
        assert_eq!(Money::parse_grouped("50,000,000").map(|m| m.won()), Some(50_000_000));
        assert_eq!(Money::parse_grouped("  1,000 ").map(|m| m.won()), Some(1_000));
        assert_eq!(Money::parse_grouped("0").map(|m| m.won()), Some(0));
        assert_eq!(Money::parse_grouped("-5,000").map(|m| m.won()), Some(-5_000));
    }

    #[test]
    fn test_parse_grouped_rejects_garbage() {
        assert_eq!(Money::parse_grouped(""), None);
        assert_eq!(Money::parse_grouped(","), None);
        assert_eq!(Money::parse_grouped("가격 문의"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_won(49_000_000)), "49,000,000원");
        assert_eq!(format!("{}", Money::from_won(500)), "500원");
        assert_eq!(format!("{}", Money::from_won(-1_000_000)), "-1,000,000원");
        assert_eq!(format!("{}", Money::zero()), "0원");
    }

    #[test]
    fn test_grouping_boundaries() {
        assert_eq!(Money::from_won(100).grouped(), "100");
        assert_eq!(Money::from_won(1_000).grouped(), "1,000");
        assert_eq!(Money::from_won(100_000).grouped(), "100,000");
        assert_eq!(Money::from_won(1_000_000).grouped(), "1,000,000");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((b - a).won(), -500);
        assert_eq!((-a).won(), -1000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.won(), 2000);
    }

    #[test]
    fn test_serializes_as_bare_integer() {
        let json = serde_json::to_string(&Money::from_won(400_000)).unwrap();
        assert_eq!(json, "400000");
        let back: Money = serde_json::from_str("400000").unwrap();
        assert_eq!(back.won(), 400_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Money::from_won(i64::MAX);
        assert_eq!((max + Money::from_won(1)).won(), i64::MAX);
        assert_eq!((Money::from_won(i64::MIN) - Money::from_won(1)).won(), i64::MIN);
        assert_eq!((-Money::from_won(i64::MIN)).won(), i64::MAX);

        let mut total = max;
        total += Money::from_won(10);
        total -= Money::from_won(10);
        assert_eq!(total.won(), i64::MAX - 10);

        let sum: Money = [max, max, Money::from_won(-5)].into_iter().sum();
        assert_eq!(sum.won(), i64::MAX - 5);
    }

}
