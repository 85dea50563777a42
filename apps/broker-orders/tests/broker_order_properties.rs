//! Property tests for broker order normalization.
//!
//! Orders are generated with their legs in random contract date order and
//! checked after construction, after a dictionary round trip and across
//! argument forms.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use proptest::sample::subsequence;
use rust_decimal::Decimal;

use broker_orders::domain::broker_order::services::resolve_multi_leg_price_to_single_price;
use broker_orders::{BrokerOrder, BrokerOrderParams, Price, PriceShape, TradeQuantity};

/// One leg: contract date, trade, fill.
type Leg = (String, i64, i64);

fn quarterly_months() -> Vec<String> {
    (2020..2026)
        .flat_map(|year| [3, 6, 9, 12].map(move |month| format!("{year}{month:02}")))
        .collect()
}

prop_compose! {
    fn legs()(
        dates in subsequence(quarterly_months(), 1..=4).prop_shuffle(),
        sizes in proptest::collection::vec((1i64..50, any::<bool>(), 0i64..=100), 4),
    ) -> Vec<Leg> {
        dates
            .into_iter()
            .zip(sizes)
            .map(|(date, (size, long, pct))| {
                let trade = if long { size } else { -size };
                (date, trade, trade * pct / 100)
            })
            .collect()
    }
}

fn params_with_fill(legs: &[Leg]) -> BrokerOrderParams {
    BrokerOrderParams {
        fill: Some(TradeQuantity::new(legs.iter().map(|leg| leg.2).collect())),
        ..Default::default()
    }
}

fn build_from_components(legs: &[Leg]) -> BrokerOrder {
    let dates: Vec<&str> = legs.iter().map(|leg| leg.0.as_str()).collect();
    let trade: Vec<i64> = legs.iter().map(|leg| leg.1).collect();
    BrokerOrder::from_components("prop", "SOFR", dates, trade, params_with_fill(legs)).unwrap()
}

fn build_from_key(legs: &[Leg]) -> BrokerOrder {
    let dates: Vec<&str> = legs.iter().map(|leg| leg.0.as_str()).collect();
    let key = format!("prop/SOFR/{}", dates.join("_"));
    let trade: Vec<i64> = legs.iter().map(|leg| leg.1).collect();
    BrokerOrder::from_key(&key, trade, params_with_fill(legs)).unwrap()
}

proptest! {
    #[test]
    fn legs_share_length_and_ascending_order(legs in legs()) {
        let order = build_from_components(&legs);

        prop_assert_eq!(order.trade().len(), legs.len());
        prop_assert_eq!(order.fill().len(), legs.len());
        prop_assert_eq!(order.contract_date().len(), legs.len());
        prop_assert!(order
            .contract_date()
            .windows(2)
            .all(|pair| pair[0].sort_key() < pair[1].sort_key()));
    }

    #[test]
    fn each_leg_keeps_its_trade_and_fill(legs in legs()) {
        let order = build_from_components(&legs);

        for (date, trade, fill) in &legs {
            let pos = order
                .contract_date()
                .iter()
                .position(|d| d.as_str() == date)
                .unwrap();
            prop_assert_eq!(order.trade().legs()[pos], *trade);
            prop_assert_eq!(order.fill().legs()[pos], *fill);
        }
    }

    #[test]
    fn calendar_spread_flag_tracks_leg_count(legs in legs()) {
        let order = build_from_components(&legs);
        prop_assert_eq!(order.calendar_spread_order(), legs.len() != 1);

        let restored = BrokerOrder::from_dict(order.to_dict()).unwrap();
        prop_assert_eq!(restored.calendar_spread_order(), legs.len() != 1);
    }

    #[test]
    fn key_and_component_forms_agree(legs in legs()) {
        prop_assert_eq!(build_from_key(&legs), build_from_components(&legs));
    }

    #[test]
    fn dict_and_json_round_trip(legs in legs()) {
        let order = build_from_components(&legs);

        prop_assert_eq!(&BrokerOrder::from_dict(order.to_dict()).unwrap(), &order);
        prop_assert_eq!(&BrokerOrder::from_json(order.to_json().unwrap()).unwrap(), &order);
    }

    #[test]
    fn spread_price_ignores_trade_scale(
        legs in proptest::collection::vec((-20i64..=20, 9000i64..11000), 2..=4),
        scale in 1i64..10,
    ) {
        prop_assume!(legs.iter().any(|leg| leg.0 != 0));
        let trade = TradeQuantity::new(legs.iter().map(|leg| leg.0).collect());
        let scaled = TradeQuantity::new(legs.iter().map(|leg| leg.0 * scale).collect());
        let prices = PriceShape::PerLeg(
            legs.iter()
                .map(|leg| Price::new(Decimal::new(leg.1, 2)))
                .collect(),
        );

        let unit = resolve_multi_leg_price_to_single_price(&trade, Some(&prices), "mid_price").unwrap();
        let bigger = resolve_multi_leg_price_to_single_price(&scaled, Some(&prices), "mid_price").unwrap();

        prop_assert_eq!(unit, bigger);
    }
}
