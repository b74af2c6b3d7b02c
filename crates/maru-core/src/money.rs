//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A 10% tier discount on ₩29,999 must come out to exactly ₩26,999,      │
//! │  every time, on every render. We get there with integer won and        │
//! │  basis-point rate math with explicit round-half-up.                    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use maru_core::money::Money;
//! use maru_core::types::DiscountRate;
//!
//! let price = Money::from_won(10_000);
//! let line = price * 10;                              // ₩100,000
//! let discounted = line.apply_discount(DiscountRate::from_bps(1000));
//! assert_eq!(discounted.won(), 90_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::types::DiscountRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole won.
///
/// ## Design Decisions
/// - **i64 (signed)**: intermediate math may dip below zero before flooring
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Transparent serde**: serializes as a bare number, matching the
///   persisted `price` field of the original state format
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from whole won.
    #[inline]
    pub const fn from_won(won: i64) -> Self {
        Money(won)
    }

    /// Returns the value in whole won.
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Applies a discount rate and returns the discounted amount,
    /// rounded half-up to the nearest won.
    ///
    /// ## Implementation
    /// Integer math in basis points: `(amount × (10000 − bps) + 5000) / 10000`.
    /// The +5000 provides round-half-up (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use maru_core::money::Money;
    /// use maru_core::types::DiscountRate;
    ///
    /// let line = Money::from_won(100_000);
    /// let discounted = line.apply_discount(DiscountRate::from_bps(1500)); // 15%
    /// assert_eq!(discounted.won(), 85_000);
    /// ```
    pub fn apply_discount(&self, rate: DiscountRate) -> Money {
        // i128 guards against overflow on large carts
        let kept = 10_000 - rate.bps() as i128;
        let discounted = (self.0 as i128 * kept + 5_000) / 10_000;
        Money(discounted as i64)
    }

    /// Subtracts a percentage of the value, rounded half-up.
    ///
    /// `percent` is a whole percentage in [0, 100]; this is the coupon
    /// encoding (a 10% coupon stores `discount_value = 10`).
    pub fn apply_percent_off(&self, percent: i64) -> Money {
        let kept = 100 - percent as i128;
        let discounted = (self.0 as i128 * kept + 50) / 100;
        Money(discounted as i64)
    }

    /// Subtracts `amount`, flooring the result at zero.
    ///
    /// Flat-amount coupons never drive a total negative.
    #[inline]
    pub fn sub_floor_zero(&self, amount: Money) -> Money {
        Money((self.0 - amount.0).max(0))
    }

    /// Renders the raw number with thousands separators: `1234567` → `"1,234,567"`.
    ///
    /// Used by the price formatter for both the shopper (`₩1,234,567`)
    /// and admin (`1,234,567원`) renditions.
    pub fn grouped(&self) -> String {
        let digits = self.0.abs().to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
        if self.0 < 0 {
            out.push('-');
        }
        let first = digits.len() % 3;
        for (i, ch) in digits.chars().enumerate() {
            if i != 0 && (i + 3 - first) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in the shopper format.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "₩{}", self.grouped())
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by integer (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_won() {
        let money = Money::from_won(10_000);
        assert_eq!(money.won(), 10_000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_won(10000)), "₩10,000");
        assert_eq!(format!("{}", Money::from_won(999)), "₩999");
        assert_eq!(format!("{}", Money::from_won(1234567)), "₩1,234,567");
        assert_eq!(format!("{}", Money::from_won(0)), "₩0");
    }

    #[test]
    fn test_grouped_negative() {
        assert_eq!(Money::from_won(-5500).grouped(), "-5,500");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_won(1000);
        let b = Money::from_won(500);

        assert_eq!((a + b).won(), 1500);
        assert_eq!((a - b).won(), 500);
        assert_eq!((a * 3).won(), 3000);
        assert_eq!(a.multiply_quantity(4).won(), 4000);
    }

    #[test]
    fn test_apply_discount_exact() {
        // ₩100,000 at 10% off = ₩90,000
        let line = Money::from_won(100_000);
        assert_eq!(line.apply_discount(DiscountRate::from_bps(1000)).won(), 90_000);
    }

    #[test]
    fn test_apply_discount_rounds_half_up() {
        // ₩999 at 15% off = 849.15 → 849
        assert_eq!(Money::from_won(999).apply_discount(DiscountRate::from_bps(1500)).won(), 849);
        // ₩10 at 5% off = 9.5 → 10 (half rounds up)
        assert_eq!(Money::from_won(10).apply_discount(DiscountRate::from_bps(500)).won(), 10);
    }

    #[test]
    fn test_apply_discount_zero_rate_is_identity() {
        let line = Money::from_won(12_345);
        assert_eq!(line.apply_discount(DiscountRate::from_bps(0)), line);
    }

    #[test]
    fn test_apply_percent_off() {
        assert_eq!(Money::from_won(90_000).apply_percent_off(10).won(), 81_000);
        // 999 × 0.9 = 899.1 → 899
        assert_eq!(Money::from_won(999).apply_percent_off(10).won(), 899);
        // half rounds up: 15 × 0.5 = 7.5 → 8
        assert_eq!(Money::from_won(15).apply_percent_off(50).won(), 8);
    }

    #[test]
    fn test_sub_floor_zero() {
        let total = Money::from_won(3_000);
        assert_eq!(total.sub_floor_zero(Money::from_won(5_000)), Money::zero());
        assert_eq!(total.sub_floor_zero(Money::from_won(1_000)).won(), 2_000);
    }

    #[test]
    fn test_serde_transparent() {
        let money = Money::from_won(10_000);
        assert_eq!(serde_json::to_string(&money).unwrap(), "10000");
        let back: Money = serde_json::from_str("10000").unwrap();
        assert_eq!(back, money);
    }
}
