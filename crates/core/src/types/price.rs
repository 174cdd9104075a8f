//! Type-safe price representation using decimal arithmetic.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A currency-agnostic money amount.
///
/// Backed by [`Decimal`] so cart totals stay exact. The catalog API reports
/// prices as plain decimal numbers with no currency code; formatting for
/// display is the presentation layer's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// A zero amount, the total of an empty cart.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price from a decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Price of `quantity` units at this unit price.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Delegate so precision flags like {:.2} apply to the amount.
        fmt::Display::fmt(&self.0, f)
    }
}

#[allow(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        Price::new(s.parse::<Decimal>().unwrap())
    }

    #[test]
    fn times_multiplies_exactly() {
        assert_eq!(price("10.00").times(2), price("20.00"));
        assert_eq!(price("5.50").times(3), price("16.50"));
        assert_eq!(price("0.10").times(3), price("0.30"));
    }

    #[test]
    fn sum_of_no_prices_is_zero() {
        let total: Price = std::iter::empty().sum();
        assert_eq!(total, Price::ZERO);
    }

    #[test]
    fn sum_adds_amounts() {
        let total: Price = [price("20.00"), price("5.50")].into_iter().sum();
        assert_eq!(total, price("25.50"));
    }

    #[test]
    fn display_honors_precision() {
        assert_eq!(format!("{:.2}", price("25.5")), "25.50");
        assert_eq!(format!("{:.2}", price("7")), "7.00");
        assert_eq!(format!("{:.2}", price("109.95")), "109.95");
    }
}
