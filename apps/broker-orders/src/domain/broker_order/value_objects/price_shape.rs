//! Scalar or per-leg price, as found in current and legacy records.

use serde::{Deserialize, Serialize};

use crate::domain::shared::Price;

/// A price field that may hold one price or one price per leg.
///
/// Current orders store a single price per order. Older records stored a
/// list with one entry per leg for filled, mid, side and offside prices.
/// Carrying the distinction as a variant keeps the legacy detection out of
/// runtime type checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceShape {
    /// One price for the whole order.
    Scalar(Price),
    /// One price per leg (legacy).
    PerLeg(Vec<Price>),
}

impl From<Price> for PriceShape {
    fn from(value: Price) -> Self {
        Self::Scalar(value)
    }
}

impl From<Vec<Price>> for PriceShape {
    fn from(value: Vec<Price>) -> Self {
        Self::PerLeg(value)
    }
}
