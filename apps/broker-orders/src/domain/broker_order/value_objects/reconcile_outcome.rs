//! Result of merging a broker-reported fill into an order.

use std::fmt;

/// Outcome of [`BrokerOrder::add_execution_details_from_matched_broker_order`].
///
/// [`BrokerOrder::add_execution_details_from_matched_broker_order`]:
///     crate::domain::broker_order::BrokerOrder::add_execution_details_from_matched_broker_order
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReconcileOutcome {
    /// Fill details were copied onto the order.
    Success,
    /// Matched fill would overfill a leg; the order was left unchanged.
    FillExceedsTrade,
}

impl ReconcileOutcome {
    /// True if the order was updated.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for ReconcileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "SUCCESS"),
            Self::FillExceedsTrade => write!(f, "FILL_EXCEEDS_TRADE"),
        }
    }
}
