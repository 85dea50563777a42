//! Broker submission context supplied when a broker order is created.

use crate::domain::broker_order::value_objects::BrokerOrderType;
use crate::domain::shared::{Price, Timestamp};

/// How and where a new broker order is being submitted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrokerSubmission {
    /// Order type sent to the broker.
    pub order_type: BrokerOrderType,
    /// Limit price for limit orders.
    pub limit_price: Option<Price>,
    /// Submission time.
    pub submit_datetime: Option<Timestamp>,
    /// Price on our side of the book.
    pub side_price: Option<Price>,
    /// Mid price.
    pub mid_price: Option<Price>,
    /// Price on the far side of the book.
    pub offside_price: Option<Price>,
    /// Algo comment.
    pub algo_comment: String,
    /// Broker name.
    pub broker: String,
    /// Brokerage account.
    pub broker_account: String,
    /// Client id.
    pub broker_clientid: String,
    /// Broker permanent reference.
    pub broker_permid: String,
    /// Broker temporary reference.
    pub broker_tempid: String,
}
