//! Broker orders spawned from contract orders.

use super::broker_order::{BrokerOrder, BrokerOrderParams};
use crate::domain::broker_order::errors::BrokerOrderError;
use crate::domain::broker_order::value_objects::{BrokerSubmission, ContractOrder, PriceShape};

/// Create a fresh broker order for `contract_order`.
///
/// Key and trade come from the contract order, which also becomes the
/// parent. Order type, prices and broker identifiers come from
/// `submission`. The new order has no fill and is active.
///
/// # Errors
///
/// Returns any construction error from [`BrokerOrder::from_key`].
pub fn create_new_broker_order_from_contract_order(
    contract_order: &ContractOrder,
    submission: BrokerSubmission,
) -> Result<BrokerOrder, BrokerOrderError> {
    if submission.order_type.requires_limit_price() && submission.limit_price.is_none() {
        tracing::warn!(
            key = %contract_order.key,
            order_type = %submission.order_type,
            "Limit broker order created without a limit price"
        );
    }

    let params = BrokerOrderParams {
        parent: contract_order.order_id,
        algo_used: contract_order.algo_to_use.clone(),
        roll_order: contract_order.roll_order,
        manual_fill: contract_order.manual_fill,
        order_type: submission.order_type,
        limit_price: submission.limit_price,
        submit_datetime: submission.submit_datetime,
        side_price: submission.side_price.map(PriceShape::Scalar),
        mid_price: submission.mid_price.map(PriceShape::Scalar),
        offside_price: submission.offside_price.map(PriceShape::Scalar),
        algo_comment: submission.algo_comment,
        broker: submission.broker,
        broker_account: submission.broker_account,
        broker_clientid: submission.broker_clientid,
        broker_permid: submission.broker_permid,
        broker_tempid: submission.broker_tempid,
        ..BrokerOrderParams::default()
    };

    BrokerOrder::from_key(
        &contract_order.key.key(),
        contract_order.trade.clone(),
        params,
    )
}
