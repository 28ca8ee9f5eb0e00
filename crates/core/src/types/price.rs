//! Type-safe price representation using decimal arithmetic.
//!
//! Prices never touch floating point: all arithmetic goes through
//! [`rust_decimal::Decimal`], so `total_price` computations are exact and
//! display rounding is the only rounding anywhere.

use std::iter::Sum;
use std::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit price in the store currency.
///
/// Wraps a [`Decimal`] amount in the currency's standard unit (e.g., dollars,
/// not cents). Serializes as a decimal string to keep snapshots exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in the smallest currency unit.
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let price = Price::from_cents(1999);
        assert_eq!(price.to_string(), "$19.99");
    }

    #[test]
    fn test_mul_quantity_exact() {
        // 0.10 * 3 must be exactly 0.30, not 0.30000000000000004
        let price = Price::from_cents(10) * 3;
        assert_eq!(price, Price::from_cents(30));
    }

    #[test]
    fn test_sum() {
        let total: Price = [Price::from_cents(1000), Price::from_cents(2550)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(3550));
    }

    #[test]
    fn test_serde_decimal_string() {
        let price = Price::from_cents(1050);
        let json = serde_json::to_string(&price).expect("serialize");
        assert_eq!(json, "\"10.50\"");
        let back: Price = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, price);
    }
}
