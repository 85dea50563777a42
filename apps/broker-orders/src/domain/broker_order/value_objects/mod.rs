//! Broker Order Value Objects

mod order_info;
mod order_type;
mod parent_orders;
mod price_shape;
mod reconcile_outcome;
mod submission;
mod trade_quantity;
mod tradeable_object;

pub use order_info::BrokerOrderInfo;
pub use order_type::BrokerOrderType;
pub use parent_orders::{ContractOrder, InstrumentOrder};
pub use price_shape::PriceShape;
pub use reconcile_outcome::ReconcileOutcome;
pub use submission::BrokerSubmission;
pub use trade_quantity::{TradeDirection, TradeQuantity};
pub use tradeable_object::{
    CONTRACT_SEPARATOR, ContractDate, ContractId, FuturesContract, FuturesContractStrategy,
    InstrumentStrategy, KEY_SEPARATOR, apply_sort_idx,
};
