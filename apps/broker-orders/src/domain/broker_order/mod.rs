//! Broker Order Bounded Context
//!
//! Representation and normalization of broker-level execution orders.
//!
//! # Key Concepts
//!
//! - **Broker Order**: the order sent to a broker, one trade entry per
//!   contract leg, legs in ascending contract date order
//! - **Canonical Form**: one price per order, with per-leg fill prices kept
//!   separately
//! - **Reconciliation**: copying a broker-reported fill onto the order
//!   without overfilling any leg

pub mod aggregate;
pub mod errors;
pub mod record;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use aggregate::{
    BrokerOrder, BrokerOrderParams, BrokerOrderWithParentInformation, OrderCore, OrderKeyArgs,
    PositionalArg, create_new_broker_order_from_contract_order,
};
pub use errors::BrokerOrderError;
pub use record::{BrokerOrderRecord, StoredOrderInfo};
pub use repository::{BrokerOrderRepository, RepositoryError};
pub use value_objects::{
    BrokerOrderInfo, BrokerOrderType, BrokerSubmission, ContractDate, ContractId, ContractOrder,
    FuturesContract, FuturesContractStrategy, InstrumentOrder, InstrumentStrategy, PriceShape,
    ReconcileOutcome, TradeDirection, TradeQuantity,
};
