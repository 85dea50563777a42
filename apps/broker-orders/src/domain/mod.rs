//! Domain Layer
//!
//! Business logic with no infrastructure dependencies:
//!
//! - **Aggregates**: the broker order and the state it shares with other
//!   order levels
//! - **Value Objects**: trade quantities, prices, tradeable object keys
//! - **Domain Services**: multi-leg price resolution
//! - **Repository Traits**: persistence abstractions (implemented in adapters)
//!
//! # Bounded Contexts
//!
//! - [`broker_order`]: broker-level execution orders

pub mod broker_order;
pub mod shared;
