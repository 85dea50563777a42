//! Construction pipeline for broker orders.
//!
//! Splits the accepted argument forms into a [`BrokerOrderKeyArguments`]
//! bundle, brings trade, fill and prices to canonical types, then orders
//! every per-leg sequence by contract date.

use crate::domain::broker_order::errors::BrokerOrderError;
use crate::domain::broker_order::services::{
    ResolvedLegPrices, calculate_prices_with_possible_legs,
    resolve_multi_leg_price_to_single_price,
};
use crate::domain::broker_order::value_objects::{
    ContractId, FuturesContractStrategy, PriceShape, TradeQuantity, apply_sort_idx,
};
use crate::domain::shared::Price;

/// One positional argument in the legacy calling convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionalArg {
    /// A key, strategy, instrument or single contract id.
    Text(String),
    /// One contract id per leg.
    TextList(Vec<String>),
    /// The trade.
    Trade(TradeQuantity),
}

impl From<&str> for PositionalArg {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Vec<&str>> for PositionalArg {
    fn from(value: Vec<&str>) -> Self {
        Self::TextList(value.into_iter().map(str::to_string).collect())
    }
}

impl From<TradeQuantity> for PositionalArg {
    fn from(value: TradeQuantity) -> Self {
        Self::Trade(value)
    }
}

/// The recognised ways of saying what an order trades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderKeyArgs {
    /// `strategy/instrument/contract_date_key` plus trade.
    Key {
        /// Composite key.
        key: String,
        /// Trade.
        trade: TradeQuantity,
    },
    /// Separate strategy, instrument and contract id(s) plus trade.
    Components {
        /// Strategy name.
        strategy: String,
        /// Instrument code.
        instrument: String,
        /// One contract id, or one per leg.
        contract_id: ContractId,
        /// Trade.
        trade: TradeQuantity,
    },
}

impl OrderKeyArgs {
    /// Interpret positional arguments: `(key, trade)` or
    /// `(strategy, instrument, contract_id, trade)`.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentShape` for any other arity or argument kinds.
    pub fn from_positional(args: Vec<PositionalArg>) -> Result<Self, BrokerOrderError> {
        let arity = args.len();
        let mut args = args.into_iter();
        match (arity, args.next(), args.next(), args.next(), args.next()) {
            (2, Some(PositionalArg::Text(key)), Some(PositionalArg::Trade(trade)), None, None) => {
                Ok(Self::Key { key, trade })
            }
            (
                4,
                Some(PositionalArg::Text(strategy)),
                Some(PositionalArg::Text(instrument)),
                Some(contract),
                Some(PositionalArg::Trade(trade)),
            ) => {
                let contract_id = match contract {
                    PositionalArg::Text(id) => ContractId::Single(id),
                    PositionalArg::TextList(ids) => ContractId::Legs(ids),
                    PositionalArg::Trade(_) => {
                        return Err(shape_error(
                            "contract id must be a string or list of strings",
                        ));
                    }
                };
                Ok(Self::Components {
                    strategy,
                    instrument,
                    contract_id,
                    trade,
                })
            }
            (2, ..) => Err(shape_error("expected (key, trade)")),
            (4, ..) => Err(shape_error(
                "expected (strategy, instrument, contract_id, trade)",
            )),
            _ => Err(shape_error(&format!(
                "expected 2 or 4 positional arguments, got {arity}"
            ))),
        }
    }

    fn into_parts(self) -> Result<(FuturesContractStrategy, TradeQuantity), BrokerOrderError> {
        match self {
            Self::Key { key, trade } => Ok((FuturesContractStrategy::from_key(&key)?, trade)),
            Self::Components {
                strategy,
                instrument,
                contract_id,
                trade,
            } => Ok((
                FuturesContractStrategy::new(strategy, instrument, contract_id)?,
                trade,
            )),
        }
    }
}

fn shape_error(message: &str) -> BrokerOrderError {
    BrokerOrderError::ArgumentShape {
        message: message.to_string(),
    }
}

/// Fill and price fields as supplied by the caller or a stored record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillAndPriceArgs {
    /// Fill so far; defaults to zero on every leg.
    pub fill: Option<TradeQuantity>,
    /// Filled price, scalar or legacy per-leg.
    pub filled_price: Option<PriceShape>,
    /// Explicit per-leg filled prices.
    pub leg_filled_price: Vec<Price>,
    /// Mid price, scalar or legacy per-leg.
    pub mid_price: Option<PriceShape>,
    /// Side price, scalar or legacy per-leg.
    pub side_price: Option<PriceShape>,
    /// Offside price, scalar or legacy per-leg.
    pub offside_price: Option<PriceShape>,
}

/// Order identity, trade and prices before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerOrderKeyArguments {
    /// What is being traded.
    pub tradeable_object: FuturesContractStrategy,
    /// Trade, per leg.
    pub trade: TradeQuantity,
    /// Fill and price fields.
    pub prices: FillAndPriceArgs,
}

/// Order identity, trade and prices in canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedKeyArguments {
    /// What is being traded, legs in ascending contract date order.
    pub tradeable_object: FuturesContractStrategy,
    /// Trade, same leg order.
    pub trade: TradeQuantity,
    /// Fill, same leg order.
    pub fill: TradeQuantity,
    /// Single filled price.
    pub filled_price: Option<Price>,
    /// Per-leg filled prices.
    pub leg_filled_price: Vec<Price>,
    /// Mid price.
    pub mid_price: Option<Price>,
    /// Side price.
    pub side_price: Option<Price>,
    /// Offside price.
    pub offside_price: Option<Price>,
}

/// Turn an argument form plus fill/price fields into a key-argument bundle.
///
/// # Errors
///
/// Returns `InvalidKey` if the key or contract ids cannot be parsed.
pub fn split_broker_order_args(
    args: OrderKeyArgs,
    prices: FillAndPriceArgs,
) -> Result<BrokerOrderKeyArguments, BrokerOrderError> {
    let (tradeable_object, trade) = args.into_parts()?;
    Ok(BrokerOrderKeyArguments {
        tradeable_object,
        trade,
        prices,
    })
}

/// Split, resolve and sort: the full construction pipeline.
///
/// # Errors
///
/// Propagates any error from splitting, resolving or sorting.
pub fn from_broker_order_args_to_resolved_args(
    args: OrderKeyArgs,
    prices: FillAndPriceArgs,
) -> Result<ResolvedKeyArguments, BrokerOrderError> {
    let mut resolved = split_broker_order_args(args, prices)?.resolve_inputs_to_order()?;
    resolved.sort_inputs_by_contract_date_order()?;
    Ok(resolved)
}

impl BrokerOrderKeyArguments {
    /// Bring trade, fill and prices to canonical types.
    ///
    /// The supplied filled price is kept aside before being collapsed to a
    /// scalar, since a legacy per-leg list must end up in
    /// `leg_filled_price`.
    ///
    /// # Errors
    ///
    /// - `LegCountMismatch` if trade or fill do not have one entry per leg.
    /// - `ParseAmbiguity`, `UnresolvablePrice` from price resolution.
    pub fn resolve_inputs_to_order(self) -> Result<ResolvedKeyArguments, BrokerOrderError> {
        let legs = self.tradeable_object.leg_count();
        let trade = self.trade;
        check_leg_count("trade", legs, trade.len())?;

        let fill = match self.prices.fill {
            Some(fill) => {
                check_leg_count("fill", legs, fill.len())?;
                fill
            }
            None => trade.zero_version(),
        };

        let original_filled_price = self.prices.filled_price;
        let filled_price = resolve_multi_leg_price_to_single_price(
            &trade,
            original_filled_price.as_ref(),
            "filled_price",
        )?;

        let ResolvedLegPrices {
            leg_filled_price,
            mid_price,
            side_price,
            offside_price,
        } = calculate_prices_with_possible_legs(
            &trade,
            self.prices.leg_filled_price,
            self.prices.mid_price.as_ref(),
            self.prices.side_price.as_ref(),
            self.prices.offside_price.as_ref(),
            original_filled_price.as_ref(),
        )?;

        Ok(ResolvedKeyArguments {
            tradeable_object: self.tradeable_object,
            trade,
            fill,
            filled_price,
            leg_filled_price,
            mid_price,
            side_price,
            offside_price,
        })
    }
}

impl ResolvedKeyArguments {
    /// Put every per-leg sequence in ascending contract date order.
    ///
    /// One permutation is derived from the contract dates and applied to
    /// trade, fill, the contract legs and per-leg fill prices, so leg `i`
    /// refers to the same contract everywhere.
    ///
    /// # Errors
    ///
    /// Returns `LegCountMismatch` if a sequence does not match the leg count.
    pub fn sort_inputs_by_contract_date_order(&mut self) -> Result<(), BrokerOrderError> {
        let idx = self.tradeable_object.sort_idx_for_contracts();
        if idx.iter().enumerate().all(|(pos, &i)| pos == i) {
            return Ok(());
        }

        let legs = idx.len();
        self.trade = self
            .trade
            .sort_with_idx(&idx)
            .ok_or_else(|| mismatch("trade", legs, self.trade.len()))?;
        self.fill = self
            .fill
            .sort_with_idx(&idx)
            .ok_or_else(|| mismatch("fill", legs, self.fill.len()))?;
        if self.leg_filled_price.len() == legs {
            self.leg_filled_price = apply_sort_idx(&self.leg_filled_price, &idx)
                .ok_or_else(|| mismatch("leg_filled_price", legs, self.leg_filled_price.len()))?;
        }
        self.tradeable_object.sort_contracts_with_idx(&idx)?;

        tracing::debug!(
            key = %self.tradeable_object,
            sort_idx = ?idx,
            "Reordered order legs by contract date"
        );
        Ok(())
    }
}

fn check_leg_count(field: &str, expected: usize, actual: usize) -> Result<(), BrokerOrderError> {
    if expected == actual {
        Ok(())
    } else {
        Err(mismatch(field, expected, actual))
    }
}

fn mismatch(field: &str, expected: usize, actual: usize) -> BrokerOrderError {
    BrokerOrderError::LegCountMismatch {
        field: field.to_string(),
        expected,
        actual,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn price(value: rust_decimal::Decimal) -> Price {
        Price::new(value)
    }

    #[test]
    fn positional_two_arguments_is_key_form() {
        let args = OrderKeyArgs::from_positional(vec![
            "carry/SOFR/202406".into(),
            TradeQuantity::single(5).into(),
        ])
        .unwrap();
        assert!(matches!(args, OrderKeyArgs::Key { .. }));
    }

    #[test]
    fn positional_four_arguments_is_components_form() {
        let args = OrderKeyArgs::from_positional(vec![
            "carry".into(),
            "SOFR".into(),
            vec!["202406", "202409"].into(),
            TradeQuantity::new(vec![5, -5]).into(),
        ])
        .unwrap();
        assert_eq!(
            args,
            OrderKeyArgs::Components {
                strategy: "carry".to_string(),
                instrument: "SOFR".to_string(),
                contract_id: ContractId::Legs(vec!["202406".to_string(), "202409".to_string()]),
                trade: TradeQuantity::new(vec![5, -5]),
            }
        );
    }

    #[test]
    fn positional_wrong_arity_fails() {
        for args in [
            vec![],
            vec!["carry/SOFR/202406".into()],
            vec!["carry".into(), "SOFR".into(), TradeQuantity::single(5).into()],
        ] {
            let err = OrderKeyArgs::from_positional(args).unwrap_err();
            assert!(matches!(err, BrokerOrderError::ArgumentShape { .. }));
        }
    }

    #[test]
    fn positional_wrong_kinds_fail() {
        let err = OrderKeyArgs::from_positional(vec![
            TradeQuantity::single(5).into(),
            "carry/SOFR/202406".into(),
        ])
        .unwrap_err();
        assert!(matches!(err, BrokerOrderError::ArgumentShape { .. }));
    }

    #[test]
    fn missing_fill_defaults_to_zero() {
        let resolved = from_broker_order_args_to_resolved_args(
            OrderKeyArgs::Key {
                key: "carry/SOFR/202406_202409".to_string(),
                trade: TradeQuantity::new(vec![3, -3]),
            },
            FillAndPriceArgs::default(),
        )
        .unwrap();
        assert_eq!(resolved.fill, TradeQuantity::new(vec![0, 0]));
    }

    #[test]
    fn trade_must_match_leg_count() {
        let err = from_broker_order_args_to_resolved_args(
            OrderKeyArgs::Key {
                key: "carry/SOFR/202406_202409".to_string(),
                trade: TradeQuantity::single(3),
            },
            FillAndPriceArgs::default(),
        )
        .unwrap_err();
        assert_eq!(err, mismatch("trade", 2, 1));
    }

    #[test]
    fn sort_applies_one_permutation_everywhere() {
        let resolved = from_broker_order_args_to_resolved_args(
            OrderKeyArgs::Components {
                strategy: "carry".to_string(),
                instrument: "SOFR".to_string(),
                contract_id: ContractId::Legs(vec!["202409".to_string(), "202406".to_string()]),
                trade: TradeQuantity::new(vec![-6, 6]),
            },
            FillAndPriceArgs {
                fill: Some(TradeQuantity::new(vec![-2, 2])),
                leg_filled_price: vec![price(dec!(100.0)), price(dec!(101.5))],
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.tradeable_object.contract_date_key(), "202406_202409");
        assert_eq!(resolved.trade, TradeQuantity::new(vec![6, -6]));
        assert_eq!(resolved.fill, TradeQuantity::new(vec![2, -2]));
        assert_eq!(resolved.leg_filled_price, vec![price(dec!(101.5)), price(dec!(100.0))]);
    }

    #[test]
    fn legacy_filled_price_is_split_into_scalar_and_legs() {
        let legacy = PriceShape::PerLeg(vec![price(dec!(101.5)), price(dec!(100.0))]);
        let resolved = from_broker_order_args_to_resolved_args(
            OrderKeyArgs::Key {
                key: "carry/SOFR/202406_202409".to_string(),
                trade: TradeQuantity::new(vec![6, -6]),
            },
            FillAndPriceArgs {
                fill: Some(TradeQuantity::new(vec![6, -6])),
                filled_price: Some(legacy),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(resolved.filled_price, Some(price(dec!(1.5))));
        assert_eq!(resolved.leg_filled_price, vec![price(dec!(101.5)), price(dec!(100.0))]);
    }
}
