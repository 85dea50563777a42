//! In-memory broker order repository.
//!
//! Stores the persisted record form, so every read goes through the same
//! restore path as a real backend.

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::broker_order::record::BrokerOrderRecord;
use crate::domain::broker_order::repository::{BrokerOrderRepository, RepositoryError};
use crate::domain::broker_order::BrokerOrder;
use crate::domain::shared::OrderId;

#[derive(Debug, Default)]
struct Store {
    records: BTreeMap<OrderId, BrokerOrderRecord>,
    last_id: Option<OrderId>,
}

impl Store {
    fn next_id(&self) -> OrderId {
        self.last_id.map_or(OrderId::new(1), |id| id.next())
    }
}

/// In-memory implementation of `BrokerOrderRepository`.
///
/// Suitable for testing and development. Not for production use.
#[derive(Debug, Default)]
pub struct InMemoryBrokerOrderRepository {
    store: RwLock<Store>,
}

impl InMemoryBrokerOrderRepository {
    /// Create a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored orders.
    ///
    /// # Errors
    ///
    /// Returns error if the store lock is poisoned.
    pub fn len(&self) -> Result<usize, RepositoryError> {
        Ok(self.read()?.records.len())
    }

    /// Check if the repository is empty.
    ///
    /// # Errors
    ///
    /// Returns error if the store lock is poisoned.
    pub fn is_empty(&self) -> Result<bool, RepositoryError> {
        Ok(self.read()?.records.is_empty())
    }

    /// Store a raw record as-is, e.g. one written by an older version.
    ///
    /// # Errors
    ///
    /// Returns error if the store lock is poisoned.
    pub fn insert_record(
        &self,
        order_id: OrderId,
        mut record: BrokerOrderRecord,
    ) -> Result<(), RepositoryError> {
        let mut store = self.write()?;
        record.order_id = Some(order_id);
        store.records.insert(order_id, record);
        store.last_id = store.last_id.max(Some(order_id));
        Ok(())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, RepositoryError> {
        self.store
            .read()
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, RepositoryError> {
        self.store
            .write()
            .map_err(|e| RepositoryError::Storage(e.to_string()))
    }

    fn restore<'a>(
        records: impl Iterator<Item = (&'a OrderId, &'a BrokerOrderRecord)>,
    ) -> Result<Vec<BrokerOrder>, RepositoryError> {
        records
            .map(|(id, record)| restore_one(*id, record))
            .collect()
    }
}

fn restore_one(order_id: OrderId, record: &BrokerOrderRecord) -> Result<BrokerOrder, RepositoryError> {
    BrokerOrder::from_dict(record.clone())
        .map_err(|source| RepositoryError::Corrupt { order_id, source })
}

#[async_trait]
impl BrokerOrderRepository for InMemoryBrokerOrderRepository {
    async fn save(&self, order: &BrokerOrder) -> Result<OrderId, RepositoryError> {
        let mut store = self.write()?;
        let order_id = order.order_id().unwrap_or_else(|| store.next_id());

        let mut record = order.to_dict();
        record.order_id = Some(order_id);
        store.records.insert(order_id, record);
        store.last_id = store.last_id.max(Some(order_id));

        tracing::debug!(order_id = %order_id, key = %order.key(), "Saved broker order");
        Ok(order_id)
    }

    async fn find_by_id(&self, id: OrderId) -> Result<Option<BrokerOrder>, RepositoryError> {
        let store = self.read()?;
        store
            .records
            .get(&id)
            .map(|record| restore_one(id, record))
            .transpose()
    }

    async fn find_by_parent(&self, parent: OrderId) -> Result<Vec<BrokerOrder>, RepositoryError> {
        let store = self.read()?;
        Self::restore(
            store
                .records
                .iter()
                .filter(|(_, record)| record.parent == Some(parent)),
        )
    }

    async fn find_active(&self) -> Result<Vec<BrokerOrder>, RepositoryError> {
        let store = self.read()?;
        Self::restore(store.records.iter().filter(|(_, record)| record.active))
    }

    async fn delete(&self, id: OrderId) -> Result<(), RepositoryError> {
        let mut store = self.write()?;
        store
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::broker_order::{BrokerOrderParams, TradeQuantity};
    use serde_json::json;

    fn order(key: &str, trade: Vec<i64>, parent: Option<u64>) -> BrokerOrder {
        BrokerOrder::from_key(
            key,
            trade,
            BrokerOrderParams {
                parent: parent.map(OrderId::new),
                ..Default::default()
            },
        )
        .unwrap()
    }

    #[tokio::test]
    async fn save_assigns_sequential_ids() {
        let repo = InMemoryBrokerOrderRepository::new();

        let first = repo.save(&order("carry/SOFR/202406", vec![1], None)).await.unwrap();
        let second = repo.save(&order("carry/SOFR/202409", vec![2], None)).await.unwrap();

        assert_eq!(first, OrderId::new(1));
        assert_eq!(second, OrderId::new(2));
        assert_eq!(repo.len().unwrap(), 2);
    }

    #[tokio::test]
    async fn save_keeps_existing_id_and_updates() {
        let repo = InMemoryBrokerOrderRepository::new();
        let id = repo.save(&order("carry/SOFR/202406", vec![5], None)).await.unwrap();

        let mut stored = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(stored.order_id(), Some(id));
        stored
            .fill_order(TradeQuantity::single(5), None, None)
            .unwrap();
        assert_eq!(repo.save(&stored).await.unwrap(), id);

        let reloaded = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(reloaded.fill(), &TradeQuantity::single(5));
        assert_eq!(repo.len().unwrap(), 1);
    }

    #[tokio::test]
    async fn find_by_parent_and_active() {
        let repo = InMemoryBrokerOrderRepository::new();
        repo.save(&order("carry/SOFR/202406", vec![1], Some(10))).await.unwrap();
        repo.save(&order("carry/SOFR/202409", vec![1], Some(11))).await.unwrap();
        let mut inactive = order("carry/SOFR/202412", vec![1], Some(10));
        inactive.deactivate();
        repo.save(&inactive).await.unwrap();

        let children = repo.find_by_parent(OrderId::new(10)).await.unwrap();
        let active = repo.find_active().await.unwrap();

        assert_eq!(children.len(), 2);
        assert_eq!(active.len(), 2);
        assert!(active.iter().all(BrokerOrder::is_active));
    }

    #[tokio::test]
    async fn delete_missing_order_fails() {
        let repo = InMemoryBrokerOrderRepository::new();
        let id = repo.save(&order("carry/SOFR/202406", vec![1], None)).await.unwrap();

        repo.delete(id).await.unwrap();

        assert!(repo.is_empty().unwrap());
        assert!(matches!(
            repo.delete(id).await,
            Err(RepositoryError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn legacy_record_is_normalized_on_load() {
        let repo = InMemoryBrokerOrderRepository::new();
        let record: BrokerOrderRecord = serde_json::from_value(json!({
            "key": "carry/SOFR/202406_202409",
            "trade": [2, -2],
            "fill": [2, -2],
            "filled_price": [101.5, 100.0],
            "fill_datetime": null,
            "locked": false,
            "order_id": null,
            "parent": null,
            "children": null,
            "active": true,
        }))
        .unwrap();
        repo.insert_record(OrderId::new(40), record).unwrap();

        let restored = repo.find_by_id(OrderId::new(40)).await.unwrap().unwrap();

        assert_eq!(restored.order_id(), Some(OrderId::new(40)));
        assert_eq!(restored.leg_filled_price().len(), 2);
        assert!(restored.filled_price().is_some());

        let next = repo.save(&order("carry/SOFR/202406", vec![1], None)).await.unwrap();
        assert_eq!(next, OrderId::new(41));
    }

    #[tokio::test]
    async fn corrupt_record_reports_order_id() {
        let repo = InMemoryBrokerOrderRepository::new();
        let mut record = order("carry/SOFR/202406", vec![1], None).to_dict();
        record.order_type = Some("stop".to_string());
        repo.insert_record(OrderId::new(3), record).unwrap();

        let err = repo.find_by_id(OrderId::new(3)).await.unwrap_err();

        assert!(matches!(err, RepositoryError::Corrupt { order_id, .. } if order_id == OrderId::new(3)));
    }
}
