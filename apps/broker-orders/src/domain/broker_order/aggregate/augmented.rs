//! Broker order decorated with its parents' reference data.
//!
//! Used when reporting slippage: the prices the parents were generated at
//! are compared with what the broker order achieved. Never persisted.

use super::broker_order::BrokerOrder;
use crate::domain::broker_order::value_objects::{ContractOrder, InstrumentOrder, TradeDirection};
use crate::domain::shared::{Price, Timestamp};

/// A broker order plus reference data from its contract and instrument
/// orders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerOrderWithParentInformation {
    order: BrokerOrder,
    /// Contract order reference price.
    pub parent_reference_price: Option<Price>,
    /// Instrument order reference time.
    pub parent_reference_datetime: Option<Timestamp>,
    /// Contract order limit price.
    pub parent_limit_price: Option<Price>,
    /// Direction of the broker order's trade.
    pub buy_or_sell: TradeDirection,
}

impl BrokerOrderWithParentInformation {
    /// Attach parent reference data to `order`.
    #[must_use]
    pub fn create_augmented_order(
        order: BrokerOrder,
        instrument_order: &InstrumentOrder,
        contract_order: &ContractOrder,
    ) -> Self {
        let buy_or_sell = order.trade().buy_or_sell();
        Self {
            order,
            parent_reference_price: contract_order.reference_price,
            parent_reference_datetime: instrument_order.reference_datetime,
            parent_limit_price: contract_order.limit_price,
            buy_or_sell,
        }
    }

    /// Get the broker order.
    #[must_use]
    pub const fn order(&self) -> &BrokerOrder {
        &self.order
    }

    /// Unwrap the broker order.
    #[must_use]
    pub fn into_order(self) -> BrokerOrder {
        self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::broker_order::aggregate::BrokerOrderParams;
    use crate::domain::broker_order::value_objects::FuturesContractStrategy;
    use rust_decimal_macros::dec;

    #[test]
    fn takes_reference_data_from_each_parent() {
        let order =
            BrokerOrder::from_key("carry/SOFR/202406", vec![-3], BrokerOrderParams::default())
                .unwrap();
        let reference_time = Timestamp::now();
        let instrument_order = InstrumentOrder {
            reference_datetime: Some(reference_time),
        };
        let mut contract_order = ContractOrder::new(
            FuturesContractStrategy::from_key("carry/SOFR/202406").unwrap(),
            vec![-3],
        );
        contract_order.reference_price = Some(Price::new(dec!(95.2)));
        contract_order.limit_price = Some(Price::new(dec!(95.1)));

        let augmented = BrokerOrderWithParentInformation::create_augmented_order(
            order.clone(),
            &instrument_order,
            &contract_order,
        );

        assert_eq!(augmented.parent_reference_price, Some(Price::new(dec!(95.2))));
        assert_eq!(augmented.parent_reference_datetime, Some(reference_time));
        assert_eq!(augmented.parent_limit_price, Some(Price::new(dec!(95.1))));
        assert_eq!(augmented.buy_or_sell, TradeDirection::Sell);
        assert_eq!(augmented.order(), &order);
        assert_eq!(augmented.into_order(), order);
    }
}
