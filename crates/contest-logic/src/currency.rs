//! Currency amounts
//!
//! Endowments, ticket costs, prizes and earnings are all currency. Shares are
//! plain `f64` fractions and only become currency once multiplied by a
//! prize.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Currency(f64);

impl Currency {
    pub const ZERO: Currency = Currency(0.0);

    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> f64 {
        self.0
    }

    /// How many whole units of `price` fit into this amount
    ///
    /// Returns 0 for a non-positive price.
    pub fn units_affordable(self, price: Currency) -> u32 {
        if price.0 <= 0.0 || self.0 <= 0.0 {
            return 0;
        }
        // 0.3 / 0.1 evaluates to 2.999..., which is still 3 tickets
        ((self.0 / price.0) + 1e-9).floor() as u32
    }
}

impl Add for Currency {
    type Output = Currency;

    fn add(self, rhs: Currency) -> Currency {
        Currency(self.0 + rhs.0)
    }
}

impl Sub for Currency {
    type Output = Currency;

    fn sub(self, rhs: Currency) -> Currency {
        Currency(self.0 - rhs.0)
    }
}

impl Mul<f64> for Currency {
    type Output = Currency;

    fn mul(self, rhs: f64) -> Currency {
        Currency(self.0 * rhs)
    }
}

impl Mul<u32> for Currency {
    type Output = Currency;

    fn mul(self, rhs: u32) -> Currency {
        Currency(self.0 * rhs as f64)
    }
}

impl Sum for Currency {
    fn sum<I: Iterator<Item = Currency>>(iter: I) -> Currency {
        iter.fold(Currency::ZERO, Add::add)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic() {
        let endowment = Currency::new(10.0);
        let cost = Currency::new(0.5);
        let spent = cost * 4u32;
        assert_eq!(spent, Currency::new(2.0));
        assert_eq!(endowment - spent, Currency::new(8.0));
        assert_eq!(Currency::new(8.0) * 0.25, Currency::new(2.0));
    }

    #[test]
    fn test_units_affordable() {
        assert_eq!(Currency::new(10.0).units_affordable(Currency::new(0.5)), 20);
        assert_eq!(Currency::new(10.0).units_affordable(Currency::new(3.0)), 3);
        assert_eq!(Currency::new(0.3).units_affordable(Currency::new(0.1)), 3);
        assert_eq!(Currency::new(10.0).units_affordable(Currency::ZERO), 0);
        assert_eq!(Currency::ZERO.units_affordable(Currency::new(0.5)), 0);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Currency::new(0.5).to_string(), "0.50");
        assert_eq!(Currency::new(10.0).to_string(), "10.00");
    }

    #[test]
    fn test_sum() {
        let total: Currency = [1.0, 2.5, 0.25].into_iter().map(Currency::new).sum();
        assert_eq!(total, Currency::new(3.75));
    }

    #[test]
    fn test_serializes_as_number() {
        let json = serde_json::to_string(&Currency::new(0.5)).unwrap();
        assert_eq!(json, "0.5");
        let back: Currency = serde_json::from_str("10").unwrap();
        assert_eq!(back, Currency::new(10.0));
    }
}
