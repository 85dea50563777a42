// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::significant_drop_tightening,
        clippy::too_many_lines,
        clippy::needless_pass_by_value,
        clippy::default_trait_access,
        clippy::items_after_statements
    )
)]

//! Broker Orders - Rust Core Library
//!
//! Representation, normalization and fill reconciliation of broker-level
//! execution orders: the orders actually sent to a broker on behalf of a
//! contract order.
//!
//! # Architecture (Clean Architecture + DDD + Hexagonal)
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: Core business logic
//!   - `broker_order`: BrokerOrder aggregate, argument normalization,
//!     multi-leg price resolution, persisted record form
//!   - `shared`: OrderId, Price, Money, Timestamp
//!
//! - **Application**: Use cases
//!   - `use_cases`: bulk fill reconciliation
//!
//! - **Infrastructure**: Adapters
//!   - `persistence`: in-memory broker order repository
//!
//! - **Config / Telemetry**: YAML configuration and tracing setup

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

// =============================================================================
// Clean Architecture Layers
// =============================================================================

/// Domain layer - Core business logic with no external dependencies.
pub mod domain;

/// Application layer - Use cases.
pub mod application;

/// Infrastructure layer - Adapters.
pub mod infrastructure;

// =============================================================================
// Cross-cutting
// =============================================================================

/// Configuration loading.
pub mod config;

/// Tracing subscriber setup.
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use domain::broker_order::{
    BrokerOrder, BrokerOrderError, BrokerOrderParams, BrokerOrderRecord, BrokerOrderRepository,
    BrokerOrderType, BrokerOrderWithParentInformation, BrokerSubmission, ContractId,
    ContractOrder, FuturesContractStrategy, InstrumentOrder, OrderKeyArgs, PositionalArg,
    PriceShape, ReconcileOutcome, RepositoryError, TradeQuantity,
    create_new_broker_order_from_contract_order,
};
pub use domain::shared::{Money, OrderId, Price, Timestamp};

pub use application::use_cases::{
    MatchedFill, ReconcileFillsUseCase, ReconciliationReport, RejectedFill,
};

pub use infrastructure::persistence::InMemoryBrokerOrderRepository;
