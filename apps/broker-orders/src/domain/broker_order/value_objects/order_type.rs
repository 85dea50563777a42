//! Broker order type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::broker_order::errors::BrokerOrderError;

/// How the order was sent to the broker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrokerOrderType {
    /// Market order.
    #[default]
    Market,
    /// Limit order.
    Limit,
    /// Balancing trade booked without going to market.
    BalanceTrade,
}

impl BrokerOrderType {
    /// Stored tag for this type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Limit => "limit",
            Self::BalanceTrade => "balance_trade",
        }
    }

    /// Returns true if this order type carries a limit price.
    #[must_use]
    pub const fn requires_limit_price(&self) -> bool {
        matches!(self, Self::Limit)
    }
}

impl fmt::Display for BrokerOrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BrokerOrderType {
    type Err = BrokerOrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "market" => Ok(Self::Market),
            "limit" => Ok(Self::Limit),
            "balance_trade" => Ok(Self::BalanceTrade),
            other => Err(BrokerOrderError::InvalidOrderType {
                value: other.to_string(),
            }),
        }
    }
}
