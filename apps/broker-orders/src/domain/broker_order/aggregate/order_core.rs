//! Generic order state shared by every order level.
//!
//! Holds identity, trade and fill bookkeeping. The broker order composes
//! this with its broker-specific details.

use crate::domain::broker_order::errors::BrokerOrderError;
use crate::domain::broker_order::value_objects::{
    BrokerOrderType, FuturesContractStrategy, TradeQuantity,
};
use crate::domain::shared::{OrderId, Price, Timestamp};

/// Identity, trade, fill and lifecycle flags of an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderCore {
    pub(super) tradeable_object: FuturesContractStrategy,
    pub(super) trade: TradeQuantity,
    pub(super) fill: TradeQuantity,
    pub(super) filled_price: Option<Price>,
    pub(super) fill_datetime: Option<Timestamp>,
    pub(super) locked: bool,
    pub(super) order_id: Option<OrderId>,
    pub(super) parent: Option<OrderId>,
    pub(super) children: Vec<OrderId>,
    pub(super) active: bool,
    pub(super) order_type: BrokerOrderType,
}

impl OrderCore {
    /// What is being traded.
    #[must_use]
    pub const fn tradeable_object(&self) -> &FuturesContractStrategy {
        &self.tradeable_object
    }

    /// Desired trade, per leg.
    #[must_use]
    pub const fn trade(&self) -> &TradeQuantity {
        &self.trade
    }

    /// Filled so far, per leg.
    #[must_use]
    pub const fn fill(&self) -> &TradeQuantity {
        &self.fill
    }

    /// Filled price.
    #[must_use]
    pub const fn filled_price(&self) -> Option<Price> {
        self.filled_price
    }

    /// When the latest fill happened.
    #[must_use]
    pub const fn fill_datetime(&self) -> Option<Timestamp> {
        self.fill_datetime
    }

    /// Order is locked against modification.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.locked
    }

    /// Internal id, `None` until stored.
    #[must_use]
    pub const fn order_id(&self) -> Option<OrderId> {
        self.order_id
    }

    /// Parent order id, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<OrderId> {
        self.parent
    }

    /// Child order ids.
    #[must_use]
    pub fn children(&self) -> &[OrderId] {
        &self.children
    }

    /// Order is still working.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Order type.
    #[must_use]
    pub const fn order_type(&self) -> BrokerOrderType {
        self.order_type
    }

    /// Every leg filled in full.
    #[must_use]
    pub fn fill_equals_desired_trade(&self) -> bool {
        self.fill == self.trade
    }

    /// Record a cumulative fill.
    ///
    /// `fill` replaces the previous fill; it is the total filled so far, not
    /// an increment. A missing `fill_datetime` is stamped with the current
    /// time.
    ///
    /// # Errors
    ///
    /// Returns `FillExceedsTrade` if any leg would be overfilled or filled
    /// in the wrong direction. The order is unchanged on error.
    pub fn fill_order(
        &mut self,
        fill: TradeQuantity,
        filled_price: Option<Price>,
        fill_datetime: Option<Timestamp>,
    ) -> Result<(), BrokerOrderError> {
        if !self.trade.fill_less_than_or_equal_to_desired_trade(&fill) {
            return Err(BrokerOrderError::FillExceedsTrade {
                trade: self.trade.to_string(),
                fill: fill.to_string(),
            });
        }

        self.fill = fill;
        self.filled_price = filled_price;
        self.fill_datetime = Some(fill_datetime.unwrap_or_else(Timestamp::now));
        Ok(())
    }

    /// Lock the order.
    pub const fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlock the order.
    pub const fn unlock(&mut self) {
        self.locked = false;
    }

    /// Mark the order as no longer working.
    pub const fn deactivate(&mut self) {
        self.active = false;
    }

    /// Assign the internal id.
    pub const fn set_order_id(&mut self, order_id: OrderId) {
        self.order_id = Some(order_id);
    }

    /// Record a child order.
    pub fn add_child(&mut self, child: OrderId) {
        if !self.children.contains(&child) {
            self.children.push(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn make_core(trade: Vec<i64>) -> OrderCore {
        let trade = TradeQuantity::new(trade);
        OrderCore {
            tradeable_object: FuturesContractStrategy::from_key("carry/SOFR/202406").unwrap(),
            fill: trade.zero_version(),
            trade,
            filled_price: None,
            fill_datetime: None,
            locked: false,
            order_id: None,
            parent: None,
            children: vec![],
            active: true,
            order_type: BrokerOrderType::Market,
        }
    }

    #[test]
    fn fill_order_records_fill() {
        let mut core = make_core(vec![10]);
        let price = Some(Price::new(dec!(101.5)));

        core.fill_order(TradeQuantity::single(4), price, None).unwrap();

        assert_eq!(core.fill(), &TradeQuantity::single(4));
        assert_eq!(core.filled_price(), price);
        assert!(core.fill_datetime().is_some());
        assert!(!core.fill_equals_desired_trade());
    }

    #[test]
    fn fill_order_rejects_overfill_without_mutation() {
        let mut core = make_core(vec![10]);
        let before = core.clone();

        let err = core
            .fill_order(TradeQuantity::single(15), Some(Price::new(dec!(100))), None)
            .unwrap_err();

        assert!(matches!(err, BrokerOrderError::FillExceedsTrade { .. }));
        assert_eq!(core, before);
    }

    #[test]
    fn complete_fill_equals_trade() {
        let mut core = make_core(vec![-3]);
        core.fill_order(TradeQuantity::single(-3), None, None).unwrap();
        assert!(core.fill_equals_desired_trade());
    }

    #[test]
    fn lifecycle_flags() {
        let mut core = make_core(vec![1]);
        core.lock();
        assert!(core.is_locked());
        core.unlock();
        assert!(!core.is_locked());
        core.deactivate();
        assert!(!core.is_active());
    }

    #[test]
    fn add_child_ignores_duplicates() {
        let mut core = make_core(vec![1]);
        core.add_child(OrderId::new(5));
        core.add_child(OrderId::new(5));
        assert_eq!(core.children(), &[OrderId::new(5)]);
    }
}
