//! End-to-end broker order flow: configuration, creation from a contract
//! order, storage, bulk reconciliation and augmentation.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use rust_decimal_macros::dec;
use serde_json::json;

use broker_orders::config::load_config_from_string;
use broker_orders::{
    BrokerOrder, BrokerOrderParams, BrokerOrderRepository, BrokerOrderType,
    BrokerOrderWithParentInformation, ContractOrder, FuturesContractStrategy,
    InMemoryBrokerOrderRepository, InstrumentOrder, MatchedFill, Money, OrderId, Price,
    ReconcileFillsUseCase, Timestamp, TradeQuantity, create_new_broker_order_from_contract_order,
};

const CONFIG: &str = r#"
logging:
  level: info
  format: json
broker:
  name: IB
  account: "${BROKER_ORDERS_FLOW_TEST_ACCOUNT:-DU555}"
  client_id: "151"
reconciliation:
  halt_on_fill_exceeds_trade: false
"#;

fn spread_contract_order() -> ContractOrder {
    let key = FuturesContractStrategy::from_key("roll/SOFR/202406_202409").unwrap();
    let mut order = ContractOrder::new(key, vec![-8, 8]);
    order.order_id = Some(OrderId::new(500));
    order.algo_to_use = "algo_original_best".to_string();
    order.roll_order = true;
    order.reference_price = Some(Price::new(dec!(-0.15)));
    order
}

#[tokio::test]
async fn contract_order_to_reconciled_broker_order() {
    let config = load_config_from_string(CONFIG).unwrap();
    let repo = Arc::new(InMemoryBrokerOrderRepository::new());

    let mut submission = config.broker.default_submission();
    submission.order_type = BrokerOrderType::Limit;
    submission.limit_price = Some(Price::new(dec!(-0.1)));
    submission.submit_datetime = Some(Timestamp::now());

    let contract_order = spread_contract_order();
    let broker_order =
        create_new_broker_order_from_contract_order(&contract_order, submission).unwrap();
    assert_eq!(broker_order.broker_account(), "DU555");
    let order_id = repo.save(&broker_order).await.unwrap();

    let mut reported = broker_order.clone();
    reported
        .fill_order(
            TradeQuantity::new(vec![-8, 8]),
            Some(Price::new(dec!(-0.12))),
            None,
        )
        .unwrap();
    reported.set_commission(Money::new(dec!(19.2)));
    reported.set_broker_permid("9001");

    let use_case = ReconcileFillsUseCase::new(Arc::clone(&repo), config.reconciliation);
    let report = use_case
        .execute(vec![MatchedFill {
            order_id,
            matched: reported,
        }])
        .await;
    assert!(report.is_success());

    let stored = repo.find_by_id(order_id).await.unwrap().unwrap();
    assert!(stored.fill_equals_desired_trade());
    assert_eq!(stored.filled_price(), Some(Price::new(dec!(-0.12))));
    assert_eq!(stored.commission(), Money::new(dec!(19.2)));
    assert_eq!(stored.broker_permid(), "9001");
    assert_eq!(stored.parent(), Some(OrderId::new(500)));

    let children = repo.find_by_parent(OrderId::new(500)).await.unwrap();
    assert_eq!(children, vec![stored.clone()]);

    let augmented = BrokerOrderWithParentInformation::create_augmented_order(
        stored,
        &InstrumentOrder::default(),
        &contract_order,
    );
    assert_eq!(augmented.parent_reference_price, Some(Price::new(dec!(-0.15))));
}

#[tokio::test]
async fn overfill_from_broker_is_reported_not_applied() {
    let config = load_config_from_string(CONFIG).unwrap();
    let repo = Arc::new(InMemoryBrokerOrderRepository::new());
    let order_id = repo
        .save(
            &BrokerOrder::from_key(
                "carry/SOFR/202406",
                TradeQuantity::single(10),
                BrokerOrderParams::default(),
            )
            .unwrap(),
        )
        .await
        .unwrap();

    let mut reported = BrokerOrder::from_key(
        "carry/SOFR/202406",
        TradeQuantity::single(15),
        BrokerOrderParams::default(),
    )
    .unwrap();
    reported
        .fill_order(TradeQuantity::single(15), Some(Price::new(dec!(99))), None)
        .unwrap();

    let report = ReconcileFillsUseCase::new(Arc::clone(&repo), config.reconciliation)
        .execute(vec![MatchedFill {
            order_id,
            matched: reported,
        }])
        .await;

    assert_eq!(report.rejected.len(), 1);
    let stored = repo.find_by_id(order_id).await.unwrap().unwrap();
    assert_eq!(stored.fill(), &TradeQuantity::single(0));
    assert_eq!(stored.filled_price(), None);
}

#[test]
fn legacy_and_current_records_describe_the_same_order() {
    let legacy = BrokerOrder::from_json(json!({
        "key": "carry/SOFR/202409_202406",
        "trade": [-3, 3],
        "fill": [-3, 3],
        "filled_price": [95.0, 95.2],
        "fill_datetime": "2024-03-01T14:30:00Z",
        "locked": false,
        "order_id": 7,
        "parent": 2,
        "children": null,
        "active": true,
        "order_type": "market",
    }))
    .unwrap();

    let current = BrokerOrder::from_json(json!({
        "key": "carry/SOFR/202406_202409",
        "trade": [3, -3],
        "fill": [3, -3],
        "filled_price": "0.2",
        "leg_filled_price": ["95.2", "95.0"],
        "fill_datetime": "2024-03-01T14:30:00Z",
        "locked": false,
        "order_id": 7,
        "parent": 2,
        "children": null,
        "active": true,
        "order_type": "market",
    }))
    .unwrap();

    assert_eq!(legacy, current);
}
