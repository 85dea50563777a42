//! Shared Value Objects
//!
//! Immutable domain types compared by value, not identity.

mod identifiers;
mod money;
mod price;
mod timestamp;

pub use identifiers::OrderId;
pub use money::Money;
pub use price::Price;
pub use timestamp::Timestamp;
