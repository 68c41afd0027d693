//! # Money Module
//!
//! Provides the `Money` type for card values, sale prices and the running
//! total of money earned.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing a binder of 20 cards in f64 and adding a 10% fee:             │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Card values, multipliers (percent) and fees (basis points) are      │
//! │    all integers. Every rounding step is explicit: half-up to the cent. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use tcis_core::money::Money;
//!
//! let base = Money::from_cents(1099);           // $10.99
//! let full_art = base.scale_percent(200);       // ×2.0 → $21.98
//! let with_fee = full_art.with_fee(1000);       // +10% → $24.18
//! assert_eq!(with_fee.cents(), 2418);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences between two card values may be negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Saturating**: operators and scaling clamp at `i64::MIN`/`i64::MAX`;
///   use `checked_mul` where an overflow must be rejected
///
/// ## Where Money is Used
/// ```text
/// Card.base_value ──► × Variant multiplier ──► Card.calculated_value
///                                                   │
///            Σ over Binder/Deck cards ◄─────────────┘
///                      │
///                      ▼
///        + handling fee (Rares, Luxury) ──► sale price ──► total money
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-dollar portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Returns the absolute difference between two amounts.
    ///
    /// Used to judge how lopsided a trade is.
    #[inline]
    pub const fn abs_diff(&self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0).saturating_abs())
    }

    /// Scales the amount by an integer percentage, rounding half up.
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::money::Money;
    ///
    /// // $0.99 × 1.5 = $1.485 → $1.49
    /// assert_eq!(Money::from_cents(99).scale_percent(150).cents(), 149);
    /// ```
    pub fn scale_percent(&self, percent: u32) -> Money {
        let scaled = (self.0 as i128 * percent as i128 + 50).div_euclid(100);
        Money::from_i128(scaled)
    }

    /// Calculates a fee in basis points, rounding half up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::money::Money;
    ///
    /// let total = Money::from_cents(10000); // $100.00
    /// assert_eq!(total.fee(1000).cents(), 1000); // 10% → $10.00
    /// ```
    pub fn fee(&self, bps: u32) -> Money {
        let fee_cents = (self.0 as i128 * bps as i128 + 5000).div_euclid(10000);
        Money::from_i128(fee_cents)
    }

    /// Clamps a wide intermediate result into range.
    fn from_i128(cents: i128) -> Money {
        Money(cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies by a quantity, or `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use tcis_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).checked_mul(4), Some(Money::from_cents(1000)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul(2), None);
    /// ```
    #[inline]
    pub const fn checked_mul(&self, qty: i64) -> Option<Money> {
        match self.0.checked_mul(qty) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Returns the amount plus a fee in basis points.
    ///
    /// ## User Workflow
    /// ```text
    /// Rares binder contents: $100.00
    ///      │
    ///      ▼
    /// with_fee(1000) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Sale price: $110.00 ──► credited to total money
    /// ```
    #[inline]
    pub fn with_fee(&self, bps: u32) -> Money {
        *self + self.fee(bps)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows money as `$12.34`.
///
/// ## Note
/// This is for logs and debugging. Presentation layers own user-facing
/// formatting.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

/// Parses a decimal dollar amount such as `"12"`, `"12.5"`, `"$12.50"`.
///
/// More than two fractional digits is rejected rather than silently
/// rounded.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let trimmed = s.trim();
        let (negative, unsigned) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let unsigned = unsigned.strip_prefix('$').unwrap_or(unsigned);

        let (whole, frac) = match unsigned.split_once('.') {
            Some((w, f)) => (w, f),
            None => (unsigned, ""),
        };

        if whole.is_empty() && frac.is_empty() {
            return Err(invalid("expected a decimal amount"));
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !frac.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid("expected digits with an optional decimal point"));
        }
        if frac.len() > 2 {
            return Err(invalid("at most two decimal places are allowed"));
        }

        let major: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid("amount is too large"))?
        };
        let minor: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid("bad cents"))? * 10,
            _ => frac.parse().map_err(|_| invalid("bad cents"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount is too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

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

/// Multiplication by i64 (for quantity calculations). Saturates.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }
}

/// Summation over card values.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
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
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);
        assert_eq!(b.abs_diff(a).cents(), 500);
    }

    #[test]
    fn test_arithmetic_saturates_instead_of_overflowing() {
        let max = Money::from_cents(i64::MAX);
        let one = Money::from_cents(1);

        assert_eq!(max + one, max);
        assert_eq!(max * 3, max);
        assert_eq!(Money::from_cents(i64::MIN) - one, Money::from_cents(i64::MIN));
        assert_eq!(max.checked_mul(2), None);
        assert_eq!(one.checked_mul(2), Some(Money::from_cents(2)));

        let mut total = max;
        total += one;
        assert_eq!(total, max);

        let sum: Money = vec![max, max].into_iter().sum();
        assert_eq!(sum, max);
    }

    #[test]
    fn test_scaling_large_values_clamps() {
        let huge = Money::from_cents(i64::MAX / 2);
        assert_eq!(huge.scale_percent(300), Money::from_cents(i64::MAX));
        assert_eq!(Money::from_cents(i64::MAX).with_fee(1000), Money::from_cents(i64::MAX));
        assert_eq!(
            Money::from_cents(i64::MIN).abs_diff(Money::from_cents(i64::MAX)),
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_scale_percent_matches_variant_multipliers() {
        let base = Money::from_cents(1000);
        assert_eq!(base.scale_percent(100).cents(), 1000);
        assert_eq!(base.scale_percent(150).cents(), 1500);
        assert_eq!(base.scale_percent(200).cents(), 2000);
        assert_eq!(base.scale_percent(300).cents(), 3000);
    }

    #[test]
    fn test_scale_percent_rounds_half_up() {
        // $0.01 × 1.5 = 1.5 cents → 2 cents
        assert_eq!(Money::from_cents(1).scale_percent(150).cents(), 2);
        // $0.03 × 1.5 = 4.5 cents → 5 cents
        assert_eq!(Money::from_cents(3).scale_percent(150).cents(), 5);
    }

    #[test]
    fn test_handling_fee() {
        let total = Money::from_cents(10000);
        assert_eq!(total.fee(1000).cents(), 1000);
        assert_eq!(total.with_fee(1000).cents(), 11000);

        // $0.05 × 10% = 0.5 cents → 1 cent
        assert_eq!(Money::from_cents(5).fee(1000).cents(), 1);
    }

    #[test]
    fn test_sum() {
        let values = vec![
            Money::from_cents(100),
            Money::from_cents(250),
            Money::from_cents(5),
        ];
        let total: Money = values.iter().sum();
        assert_eq!(total.cents(), 355);

        let empty: Money = Vec::<Money>::new().into_iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_parse() {
        assert_eq!("12".parse::<Money>().unwrap().cents(), 1200);
        assert_eq!("12.5".parse::<Money>().unwrap().cents(), 1250);
        assert_eq!("$0.99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!(" 1.00 ".parse::<Money>().unwrap().cents(), 100);
        assert_eq!("-2.50".parse::<Money>().unwrap().cents(), -250);
        assert_eq!(".75".parse::<Money>().unwrap().cents(), 75);

        assert!("".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.234".parse::<Money>().is_err());
        assert!("1,00".parse::<Money>().is_err());
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        assert!(Money::from_cents(100).is_positive());
        assert!(Money::from_cents(-100).is_negative());
        assert_eq!(Money::from_cents(-100).abs().cents(), 100);
    }
}
