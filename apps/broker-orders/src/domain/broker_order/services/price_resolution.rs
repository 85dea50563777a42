//! Multi-leg price resolution.
//!
//! Older records stored filled, mid, side and offside prices as one entry
//! per leg. Current records store a single price per order and keep any
//! per-leg fill prices in `leg_filled_price`. These functions bring either
//! shape to the current form.

use rust_decimal::Decimal;

use crate::domain::broker_order::errors::BrokerOrderError;
use crate::domain::broker_order::value_objects::{PriceShape, TradeDirection, TradeQuantity};
use crate::domain::shared::Price;

/// Canonical submission prices plus per-leg fill prices.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedLegPrices {
    /// Per-leg filled prices.
    pub leg_filled_price: Vec<Price>,
    /// Mid price.
    pub mid_price: Option<Price>,
    /// Side price.
    pub side_price: Option<Price>,
    /// Offside price.
    pub offside_price: Option<Price>,
}

/// Collapse a possibly per-leg price into a single price for `trade`.
///
/// A per-leg list is weighted by the trade's legs divided by their common
/// factor, signed so the first non-zero leg weighs positive. A `[6, -6]`
/// spread filled at `[101.5, 100.0]` resolves to `1.5`: the price of one
/// unit of the spread. The `[-6, 6]` sell of the same spread resolves to
/// the same `1.5`.
///
/// # Errors
///
/// - `LegCountMismatch` if a list with more than one entry does not have
///   one entry per leg.
/// - `UnresolvablePrice` if every leg of the trade is zero, or the
///   weighted sum overflows.
pub fn resolve_multi_leg_price_to_single_price(
    trade: &TradeQuantity,
    price: Option<&PriceShape>,
    field: &str,
) -> Result<Option<Price>, BrokerOrderError> {
    let prices = match price {
        None => return Ok(None),
        Some(PriceShape::Scalar(p)) => return Ok(Some(*p)),
        Some(PriceShape::PerLeg(prices)) => prices,
    };

    match prices.as_slice() {
        [] => return Ok(None),
        [single] => return Ok(Some(*single)),
        _ => {}
    }

    if prices.len() != trade.len() {
        return Err(BrokerOrderError::LegCountMismatch {
            field: field.to_string(),
            expected: trade.len(),
            actual: prices.len(),
        });
    }

    let factor = trade
        .common_factor()
        .ok_or_else(|| BrokerOrderError::UnresolvablePrice {
            field: field.to_string(),
            message: format!("trade {trade} has no non-zero leg"),
        })?;
    let factor = Decimal::from(factor);
    let sign = match trade.buy_or_sell() {
        TradeDirection::Sell => Decimal::NEGATIVE_ONE,
        TradeDirection::Buy | TradeDirection::Flat => Decimal::ONE,
    };

    let spread_price = trade
        .legs()
        .iter()
        .zip(prices)
        .try_fold(Price::ZERO, |acc, (&qty, &leg_price)| {
            let weight = Decimal::from(qty) * sign / factor;
            leg_price.checked_weighted(weight)?.checked_add(acc)
        })
        .ok_or_else(|| BrokerOrderError::UnresolvablePrice {
            field: field.to_string(),
            message: format!("weighted sum of {prices:?} over trade {trade} overflows"),
        })?;

    Ok(Some(spread_price))
}

/// Reconcile legacy per-leg prices with the current scalar layout.
///
/// `original_filled_price` is the filled price as supplied, before it was
/// coerced to a scalar. If it was a per-leg list and no leg prices were
/// given, the list is kept as `leg_filled_price`.
///
/// # Errors
///
/// - `ParseAmbiguity` when both explicit leg prices and a per-leg filled
///   price are supplied.
/// - Any error from [`resolve_multi_leg_price_to_single_price`].
pub fn calculate_prices_with_possible_legs(
    trade: &TradeQuantity,
    leg_filled_price: Vec<Price>,
    mid_price: Option<&PriceShape>,
    side_price: Option<&PriceShape>,
    offside_price: Option<&PriceShape>,
    original_filled_price: Option<&PriceShape>,
) -> Result<ResolvedLegPrices, BrokerOrderError> {
    let leg_filled_price = match original_filled_price {
        None | Some(PriceShape::Scalar(_)) => leg_filled_price,
        Some(PriceShape::PerLeg(legacy)) if leg_filled_price.is_empty() => {
            tracing::debug!(legs = legacy.len(), "Keeping legacy per-leg filled prices");
            legacy.clone()
        }
        Some(PriceShape::PerLeg(_)) => {
            return Err(BrokerOrderError::ParseAmbiguity {
                message: "filled_price is a per-leg list and leg_filled_price is also set"
                    .to_string(),
            });
        }
    };

    Ok(ResolvedLegPrices {
        leg_filled_price,
        mid_price: resolve_multi_leg_price_to_single_price(trade, mid_price, "mid_price")?,
        side_price: resolve_multi_leg_price_to_single_price(trade, side_price, "side_price")?,
        offside_price: resolve_multi_leg_price_to_single_price(
            trade,
            offside_price,
            "offside_price",
        )?,
    })
}
