//! Per-leg trade quantities.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction of a trade, taken from its first non-zero leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeDirection {
    /// Buying (first non-zero leg positive).
    Buy,
    /// Selling (first non-zero leg negative).
    Sell,
    /// No non-zero leg.
    Flat,
}

/// Signed contract quantities, one entry per leg.
///
/// A single-contract order has one leg; a calendar spread has one leg per
/// contract date. Persisted records may hold a bare integer for
/// single-leg orders, so deserialization accepts either shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct TradeQuantity(Vec<i64>);

impl TradeQuantity {
    /// Create from per-leg quantities.
    #[must_use]
    pub const fn new(legs: Vec<i64>) -> Self {
        Self(legs)
    }

    /// Single-leg quantity.
    #[must_use]
    pub fn single(qty: i64) -> Self {
        Self(vec![qty])
    }

    /// Per-leg quantities.
    #[must_use]
    pub fn legs(&self) -> &[i64] {
        &self.0
    }

    /// Number of legs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no legs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Same number of legs, all zero.
    #[must_use]
    pub fn zero_version(&self) -> Self {
        Self(vec![0; self.0.len()])
    }

    /// Reorder legs so that leg `i` becomes the old leg `idx[i]`.
    ///
    /// Returns `None` if `idx` is not a permutation of this trade's legs.
    #[must_use]
    pub fn sort_with_idx(&self, idx: &[usize]) -> Option<Self> {
        super::apply_sort_idx(&self.0, idx).map(Self)
    }

    /// Check that `proposed_fill` never exceeds this trade on any leg.
    ///
    /// Each non-zero fill leg must point the same way as the trade leg and
    /// be no larger in magnitude. Leg counts must match.
    #[must_use]
    pub fn fill_less_than_or_equal_to_desired_trade(&self, proposed_fill: &Self) -> bool {
        if self.len() != proposed_fill.len() {
            return false;
        }
        self.0
            .iter()
            .zip(proposed_fill.0.iter())
            .all(|(&trade, &fill)| {
                fill == 0
                    || (fill.signum() == trade.signum()
                        && fill.unsigned_abs() <= trade.unsigned_abs())
            })
    }

    /// Buy or sell, from the first non-zero leg.
    #[must_use]
    pub fn buy_or_sell(&self) -> TradeDirection {
        match self.0.iter().find(|&&q| q != 0) {
            Some(q) if *q > 0 => TradeDirection::Buy,
            Some(_) => TradeDirection::Sell,
            None => TradeDirection::Flat,
        }
    }

    /// Largest unit that divides every non-zero leg.
    ///
    /// A `[6, -6]` spread is six units of `[1, -1]`. `None` when every leg
    /// is zero.
    #[must_use]
    pub fn common_factor(&self) -> Option<u64> {
        self.0
            .iter()
            .map(|q| q.unsigned_abs())
            .filter(|&q| q != 0)
            .reduce(gcd)
    }
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 { a } else { gcd(b, a % b) }
}

impl fmt::Display for TradeQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl From<i64> for TradeQuantity {
    fn from(value: i64) -> Self {
        Self::single(value)
    }
}

impl From<Vec<i64>> for TradeQuantity {
    fn from(value: Vec<i64>) -> Self {
        Self(value)
    }
}

impl<'de> Deserialize<'de> for TradeQuantity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Stored {
            Single(i64),
            Legs(Vec<i64>),
        }

        Ok(match Stored::deserialize(deserializer)? {
            Stored::Single(qty) => Self::single(qty),
            Stored::Legs(legs) => Self(legs),
        })
    }
}
