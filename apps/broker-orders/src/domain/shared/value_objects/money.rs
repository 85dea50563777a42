//! Money value object for commissions.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A monetary amount charged by the broker.
///
/// Represented as a Decimal so commissions accumulate without float drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new Money value from a Decimal.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Get the inner Decimal value.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl From<Decimal> for Money {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl From<Money> for Decimal {
    fn from(value: Money) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn money_default_is_zero() {
        assert_eq!(Money::default().amount(), Decimal::ZERO);
    }

    #[test]
    fn money_display() {
        assert_eq!(format!("{}", Money::new(dec!(2.3))), "2.30");
    }

    #[test]
    fn money_deserializes_from_number_or_string() {
        let from_number: Money = serde_json::from_str("2.3").unwrap();
        let from_string: Money = serde_json::from_str("\"2.3\"").unwrap();
        assert_eq!(from_number, from_string);
    }
}
