//! Broker-specific order details.

use crate::domain::shared::{Money, Price, Timestamp};

/// Everything a broker order records beyond the generic order fields.
///
/// Prices are in canonical form: one price per order. Per-leg fill prices
/// from legacy records, or reported by the broker for spreads, live in
/// `leg_filled_price`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrokerOrderInfo {
    /// Algo that generated the order.
    pub algo_used: String,
    /// Free-text comment from the algo (e.g. "Aggressive").
    pub algo_comment: String,
    /// When the order was submitted.
    pub submit_datetime: Option<Timestamp>,
    /// Limit price for limit orders.
    pub limit_price: Option<Price>,
    /// Price on our side of the book at submission.
    pub side_price: Option<Price>,
    /// Mid price at submission.
    pub mid_price: Option<Price>,
    /// Price on the far side of the book at submission.
    pub offside_price: Option<Price>,
    /// Fill was entered by hand rather than picked up from the broker.
    pub manual_fill: bool,
    /// Order belongs to a roll.
    pub roll_order: bool,
    /// Trade spans more than one leg. Set once at construction.
    pub calendar_spread_order: bool,
    /// Broker name.
    pub broker: String,
    /// Brokerage account.
    pub broker_account: String,
    /// Client id used to place the order.
    pub broker_clientid: String,
    /// Broker's permanent reference.
    pub broker_permid: String,
    /// Broker's temporary reference.
    pub broker_tempid: String,
    /// Commission charged.
    pub commission: Money,
    /// Per-leg filled prices.
    pub leg_filled_price: Vec<Price>,
}
