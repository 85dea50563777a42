//! Shared Domain Types
//!
//! Value objects shared across the broker order context.

pub mod value_objects;

pub use value_objects::{Money, OrderId, Price, Timestamp};
