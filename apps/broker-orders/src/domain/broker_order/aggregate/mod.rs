//! Broker Order Aggregate
//!
//! The broker order is the root entity; `OrderCore` carries the state every
//! order level shares.

mod augmented;
mod broker_order;
mod factory;
mod key_arguments;
mod order_core;

pub use augmented::BrokerOrderWithParentInformation;
pub use broker_order::{BrokerOrder, BrokerOrderParams};
pub use factory::create_new_broker_order_from_contract_order;
pub use key_arguments::{
    BrokerOrderKeyArguments, FillAndPriceArgs, OrderKeyArgs, PositionalArg,
    ResolvedKeyArguments, from_broker_order_args_to_resolved_args, split_broker_order_args,
};
pub use order_core::OrderCore;
