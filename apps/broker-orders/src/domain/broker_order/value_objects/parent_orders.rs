//! Upstream orders a broker order is derived from.
//!
//! Only the fields the broker order reads are modelled here.

use crate::domain::broker_order::value_objects::{FuturesContractStrategy, TradeQuantity};
use crate::domain::shared::{OrderId, Price, Timestamp};

/// Contract-level order that spawns broker orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractOrder {
    /// What is being traded.
    pub key: FuturesContractStrategy,
    /// Desired trade, per leg.
    pub trade: TradeQuantity,
    /// Contract order id, if stored.
    pub order_id: Option<OrderId>,
    /// Algo assigned to execute this order.
    pub algo_to_use: String,
    /// Part of a roll.
    pub roll_order: bool,
    /// Fill will be entered by hand.
    pub manual_fill: bool,
    /// Price when the order was generated.
    pub reference_price: Option<Price>,
    /// Limit price, if any.
    pub limit_price: Option<Price>,
}

impl ContractOrder {
    /// Contract order with no id, algo or prices.
    #[must_use]
    pub fn new(key: FuturesContractStrategy, trade: impl Into<TradeQuantity>) -> Self {
        Self {
            key,
            trade: trade.into(),
            order_id: None,
            algo_to_use: String::new(),
            roll_order: false,
            manual_fill: false,
            reference_price: None,
            limit_price: None,
        }
    }
}

/// Instrument-level order a contract order was generated from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InstrumentOrder {
    /// When the trade was originally generated.
    pub reference_datetime: Option<Timestamp>,
}
