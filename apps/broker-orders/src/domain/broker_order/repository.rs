//! Broker Order Repository Trait
//!
//! Persistence abstraction for broker orders. Implemented by adapters in
//! the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;

use super::aggregate::BrokerOrder;
use super::errors::BrokerOrderError;
use crate::domain::shared::OrderId;

/// Errors raised by broker order persistence.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No order stored under the id.
    #[error("Broker order not found: {0}")]
    NotFound(OrderId),

    /// A stored record could not be turned back into an order.
    #[error("Stored broker order {order_id} is invalid: {source}")]
    Corrupt {
        /// Id of the stored record.
        order_id: OrderId,
        /// Why the record was rejected.
        #[source]
        source: BrokerOrderError,
    },

    /// Backend failure.
    #[error("Broker order storage failed: {0}")]
    Storage(String),
}

/// Repository trait for broker order persistence.
#[async_trait]
pub trait BrokerOrderRepository: Send + Sync {
    /// Insert or update an order.
    ///
    /// An order without an id is assigned the next free id. Returns the id
    /// the order is stored under.
    ///
    /// # Errors
    ///
    /// Returns error if persistence fails.
    async fn save(&self, order: &BrokerOrder) -> Result<OrderId, RepositoryError>;

    /// Find an order by its internal id.
    ///
    /// # Errors
    ///
    /// Returns error if the stored record is invalid or the query fails.
    async fn find_by_id(&self, id: OrderId) -> Result<Option<BrokerOrder>, RepositoryError>;

    /// Find every order spawned by a contract order.
    ///
    /// # Errors
    ///
    /// Returns error if a stored record is invalid or the query fails.
    async fn find_by_parent(&self, parent: OrderId) -> Result<Vec<BrokerOrder>, RepositoryError>;

    /// Find all active orders.
    ///
    /// # Errors
    ///
    /// Returns error if a stored record is invalid or the query fails.
    async fn find_active(&self) -> Result<Vec<BrokerOrder>, RepositoryError>;

    /// Delete an order by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no order is stored under `id`.
    async fn delete(&self, id: OrderId) -> Result<(), RepositoryError>;
}
