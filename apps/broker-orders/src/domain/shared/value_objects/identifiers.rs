//! Strongly-typed order identifiers.
//!
//! Orders are numbered by the persistence layer. An order that has not been
//! stored yet carries no id, so "no id", "no parent" and "no children" are
//! expressed as `Option<OrderId>` / empty `Vec<OrderId>` rather than magic
//! numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Internal identifier for an order (broker, contract or instrument level).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(u64);

impl OrderId {
    /// Create a new identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Get the inner value.
    #[must_use]
    pub const fn value(&self) -> u64 {
        self.0
    }

    /// The identifier following this one.
    #[must_use]
    pub const fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for OrderId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<OrderId> for u64 {
    fn from(value: OrderId) -> Self {
        value.0
    }
}
