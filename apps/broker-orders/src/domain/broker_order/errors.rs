//! Broker order errors.

use thiserror::Error;

/// Errors raised while building, restoring or filling a broker order.
///
/// Overfilling during reconciliation is not an error: it is reported as
/// [`ReconcileOutcome::FillExceedsTrade`](super::value_objects::ReconcileOutcome)
/// so that bulk callers can carry on past one bad match.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerOrderError {
    /// Constructor arguments were not one of the recognised shapes.
    #[error("Unrecognised broker order arguments: {message}")]
    ArgumentShape {
        /// What was wrong with the arguments.
        message: String,
    },

    /// Legacy and current price shapes conflict.
    #[error("Cannot parse order prices: {message}")]
    ParseAmbiguity {
        /// Description of the conflicting fields.
        message: String,
    },

    /// Tradeable object key or contract date could not be parsed.
    #[error("Invalid tradeable object key '{key}': {message}")]
    InvalidKey {
        /// The offending key.
        key: String,
        /// Error message.
        message: String,
    },

    /// A per-leg sequence has the wrong number of entries.
    #[error("'{field}' has {actual} legs, expected {expected}")]
    LegCountMismatch {
        /// Field with the wrong length.
        field: String,
        /// Number of legs on the order.
        expected: usize,
        /// Number of entries supplied.
        actual: usize,
    },

    /// A per-leg price cannot be collapsed to a single price.
    #[error("Cannot resolve '{field}' to a single price: {message}")]
    UnresolvablePrice {
        /// Price field.
        field: String,
        /// Error message.
        message: String,
    },

    /// Stored order type tag is not a broker order type.
    #[error("Unknown broker order type: {value}")]
    InvalidOrderType {
        /// Stored tag.
        value: String,
    },

    /// Fill would exceed the desired trade on some leg.
    #[error("Fill {fill} exceeds trade {trade}")]
    FillExceedsTrade {
        /// Desired trade.
        trade: String,
        /// Proposed fill.
        fill: String,
    },

    /// Persisted order could not be read.
    #[error("Malformed broker order record: {message}")]
    Deserialization {
        /// Underlying serde error.
        message: String,
    },
}

impl From<serde_json::Error> for BrokerOrderError {
    fn from(err: serde_json::Error) -> Self {
        Self::Deserialization {
            message: err.to_string(),
        }
    }
}
