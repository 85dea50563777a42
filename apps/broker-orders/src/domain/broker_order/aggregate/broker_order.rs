//! Broker Order Aggregate Root
//!
//! A broker order is the order actually sent to a broker, derived from a
//! contract order. It holds the trade per contract leg, what has been
//! filled and at what price, and the pricing context at submission.
//!
//! Every constructor runs the same normalization pipeline, so legacy and
//! current shapes of the same order end up identical.

use tracing::Span;

use super::key_arguments::{
    FillAndPriceArgs, OrderKeyArgs, PositionalArg, from_broker_order_args_to_resolved_args,
};
use super::order_core::OrderCore;
use crate::domain::broker_order::errors::BrokerOrderError;
use crate::domain::broker_order::value_objects::{
    BrokerOrderInfo, BrokerOrderType, ContractDate, ContractId, FuturesContract,
    FuturesContractStrategy, InstrumentStrategy, PriceShape, ReconcileOutcome, TradeQuantity,
};
use crate::domain::shared::{Money, OrderId, Price, Timestamp};

/// Optional fields accepted by every broker order constructor.
///
/// Prices may be given in the legacy per-leg shape; they are normalized
/// on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerOrderParams {
    /// Fill so far; zero on every leg when absent.
    pub fill: Option<TradeQuantity>,
    /// Filled price.
    pub filled_price: Option<PriceShape>,
    /// Per-leg filled prices.
    pub leg_filled_price: Vec<Price>,
    /// When the latest fill happened.
    pub fill_datetime: Option<Timestamp>,
    /// Locked against modification.
    pub locked: bool,
    /// Internal id.
    pub order_id: Option<OrderId>,
    /// Parent contract order id.
    pub parent: Option<OrderId>,
    /// Child order ids.
    pub children: Vec<OrderId>,
    /// Still working.
    pub active: bool,
    /// Order type.
    pub order_type: BrokerOrderType,
    /// Algo that generated the order.
    pub algo_used: String,
    /// Algo comment.
    pub algo_comment: String,
    /// Submission time.
    pub submit_datetime: Option<Timestamp>,
    /// Limit price.
    pub limit_price: Option<Price>,
    /// Side price at submission.
    pub side_price: Option<PriceShape>,
    /// Mid price at submission.
    pub mid_price: Option<PriceShape>,
    /// Offside price at submission.
    pub offside_price: Option<PriceShape>,
    /// Fill entered by hand.
    pub manual_fill: bool,
    /// Part of a roll.
    pub roll_order: bool,
    /// Broker name.
    pub broker: String,
    /// Brokerage account.
    pub broker_account: String,
    /// Client id.
    pub broker_clientid: String,
    /// Broker permanent reference.
    pub broker_permid: String,
    /// Broker temporary reference.
    pub broker_tempid: String,
    /// Commission charged.
    pub commission: Money,
}

impl Default for BrokerOrderParams {
    fn default() -> Self {
        Self {
            fill: None,
            filled_price: None,
            leg_filled_price: Vec::new(),
            fill_datetime: None,
            locked: false,
            order_id: None,
            parent: None,
            children: Vec::new(),
            active: true,
            order_type: BrokerOrderType::Market,
            algo_used: String::new(),
            algo_comment: String::new(),
            submit_datetime: None,
            limit_price: None,
            side_price: None,
            mid_price: None,
            offside_price: None,
            manual_fill: false,
            roll_order: false,
            broker: String::new(),
            broker_account: String::new(),
            broker_clientid: String::new(),
            broker_permid: String::new(),
            broker_tempid: String::new(),
            commission: Money::ZERO,
        }
    }
}

/// Broker order aggregate root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokerOrder {
    core: OrderCore,
    info: BrokerOrderInfo,
}

impl BrokerOrder {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Build from either argument form.
    ///
    /// # Errors
    ///
    /// Returns any error from key parsing, leg count checks or price
    /// resolution.
    pub fn new(args: OrderKeyArgs, params: BrokerOrderParams) -> Result<Self, BrokerOrderError> {
        let prices = FillAndPriceArgs {
            fill: params.fill,
            filled_price: params.filled_price,
            leg_filled_price: params.leg_filled_price,
            mid_price: params.mid_price,
            side_price: params.side_price,
            offside_price: params.offside_price,
        };
        let resolved = from_broker_order_args_to_resolved_args(args, prices)?;

        let calendar_spread_order = resolved.trade.len() != 1;

        let core = OrderCore {
            tradeable_object: resolved.tradeable_object,
            trade: resolved.trade,
            fill: resolved.fill,
            filled_price: resolved.filled_price,
            fill_datetime: params.fill_datetime,
            locked: params.locked,
            order_id: params.order_id,
            parent: params.parent,
            children: params.children,
            active: params.active,
            order_type: params.order_type,
        };

        let info = BrokerOrderInfo {
            algo_used: params.algo_used,
            algo_comment: params.algo_comment,
            submit_datetime: params.submit_datetime,
            limit_price: params.limit_price,
            side_price: resolved.side_price,
            mid_price: resolved.mid_price,
            offside_price: resolved.offside_price,
            manual_fill: params.manual_fill,
            roll_order: params.roll_order,
            calendar_spread_order,
            broker: params.broker,
            broker_account: params.broker_account,
            broker_clientid: params.broker_clientid,
            broker_permid: params.broker_permid,
            broker_tempid: params.broker_tempid,
            commission: params.commission,
            leg_filled_price: resolved.leg_filled_price,
        };

        Ok(Self { core, info })
    }

    /// Build from a `strategy/instrument/contract_date_key` key.
    ///
    /// # Errors
    ///
    /// See [`BrokerOrder::new`].
    pub fn from_key(
        key: &str,
        trade: impl Into<TradeQuantity>,
        params: BrokerOrderParams,
    ) -> Result<Self, BrokerOrderError> {
        Self::new(
            OrderKeyArgs::Key {
                key: key.to_string(),
                trade: trade.into(),
            },
            params,
        )
    }

    /// Build from strategy, instrument and contract id(s).
    ///
    /// # Errors
    ///
    /// See [`BrokerOrder::new`].
    pub fn from_components(
        strategy: &str,
        instrument: &str,
        contract_id: impl Into<ContractId>,
        trade: impl Into<TradeQuantity>,
        params: BrokerOrderParams,
    ) -> Result<Self, BrokerOrderError> {
        Self::new(
            OrderKeyArgs::Components {
                strategy: strategy.to_string(),
                instrument: instrument.to_string(),
                contract_id: contract_id.into(),
                trade: trade.into(),
            },
            params,
        )
    }

    /// Build from two or four positional arguments.
    ///
    /// # Errors
    ///
    /// Returns `ArgumentShape` for any other arity, otherwise see
    /// [`BrokerOrder::new`].
    pub fn from_positional(
        args: Vec<PositionalArg>,
        params: BrokerOrderParams,
    ) -> Result<Self, BrokerOrderError> {
        Self::new(OrderKeyArgs::from_positional(args)?, params)
    }

    // ========================================================================
    // Key accessors
    // ========================================================================

    /// Get the tradeable object.
    #[must_use]
    pub const fn tradeable_object(&self) -> &FuturesContractStrategy {
        self.core.tradeable_object()
    }

    /// Get the strategy name.
    #[must_use]
    pub fn strategy_name(&self) -> &str {
        self.core.tradeable_object().strategy_name()
    }

    /// Get the instrument code.
    #[must_use]
    pub fn instrument_code(&self) -> &str {
        self.core.tradeable_object().instrument_code()
    }

    /// Get the contract legs.
    #[must_use]
    pub fn contract_date(&self) -> &[ContractDate] {
        self.core.tradeable_object().contract_dates()
    }

    /// Get the contract dates joined with `_`.
    #[must_use]
    pub fn contract_date_key(&self) -> String {
        self.core.tradeable_object().contract_date_key()
    }

    /// Get strategy and instrument.
    #[must_use]
    pub fn instrument_strategy(&self) -> InstrumentStrategy {
        self.core.tradeable_object().instrument_strategy()
    }

    /// Get instrument and contract legs.
    #[must_use]
    pub fn futures_contract(&self) -> FuturesContract {
        self.core.tradeable_object().futures_contract()
    }

    /// Get the full key.
    #[must_use]
    pub fn key(&self) -> String {
        self.core.tradeable_object().key()
    }

    // ========================================================================
    // Order state accessors
    // ========================================================================

    /// Get the generic order state.
    #[must_use]
    pub const fn core(&self) -> &OrderCore {
        &self.core
    }

    /// Get the broker details.
    #[must_use]
    pub const fn info(&self) -> &BrokerOrderInfo {
        &self.info
    }

    /// Get the desired trade.
    #[must_use]
    pub const fn trade(&self) -> &TradeQuantity {
        self.core.trade()
    }

    /// Get the fill so far.
    #[must_use]
    pub const fn fill(&self) -> &TradeQuantity {
        self.core.fill()
    }

    /// Get the filled price.
    #[must_use]
    pub const fn filled_price(&self) -> Option<Price> {
        self.core.filled_price()
    }

    /// Get the fill time.
    #[must_use]
    pub const fn fill_datetime(&self) -> Option<Timestamp> {
        self.core.fill_datetime()
    }

    /// Get the internal id.
    #[must_use]
    pub const fn order_id(&self) -> Option<OrderId> {
        self.core.order_id()
    }

    /// Get the parent contract order id.
    #[must_use]
    pub const fn parent(&self) -> Option<OrderId> {
        self.core.parent()
    }

    /// Get the child order ids.
    #[must_use]
    pub fn children(&self) -> &[OrderId] {
        self.core.children()
    }

    /// Check if the order is locked.
    #[must_use]
    pub const fn is_locked(&self) -> bool {
        self.core.is_locked()
    }

    /// Check if the order is still working.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.core.is_active()
    }

    /// Get the order type.
    #[must_use]
    pub const fn order_type(&self) -> BrokerOrderType {
        self.core.order_type()
    }

    /// Check if every leg is filled.
    #[must_use]
    pub fn fill_equals_desired_trade(&self) -> bool {
        self.core.fill_equals_desired_trade()
    }

    // ========================================================================
    // Broker detail accessors
    // ========================================================================

    /// Get the algo that generated the order.
    #[must_use]
    pub fn algo_used(&self) -> &str {
        &self.info.algo_used
    }

    /// Get the algo comment.
    #[must_use]
    pub fn algo_comment(&self) -> &str {
        &self.info.algo_comment
    }

    /// Get the submission time.
    #[must_use]
    pub const fn submit_datetime(&self) -> Option<Timestamp> {
        self.info.submit_datetime
    }

    /// Get the limit price.
    #[must_use]
    pub const fn limit_price(&self) -> Option<Price> {
        self.info.limit_price
    }

    /// Get the side price.
    #[must_use]
    pub const fn side_price(&self) -> Option<Price> {
        self.info.side_price
    }

    /// Get the mid price.
    #[must_use]
    pub const fn mid_price(&self) -> Option<Price> {
        self.info.mid_price
    }

    /// Get the offside price.
    #[must_use]
    pub const fn offside_price(&self) -> Option<Price> {
        self.info.offside_price
    }

    /// Check if the fill was entered by hand.
    #[must_use]
    pub const fn manual_fill(&self) -> bool {
        self.info.manual_fill
    }

    /// Check if the order is part of a roll.
    #[must_use]
    pub const fn roll_order(&self) -> bool {
        self.info.roll_order
    }

    /// Check if the trade spans more than one leg.
    #[must_use]
    pub const fn calendar_spread_order(&self) -> bool {
        self.info.calendar_spread_order
    }

    /// Get the broker name.
    #[must_use]
    pub fn broker(&self) -> &str {
        &self.info.broker
    }

    /// Get the brokerage account.
    #[must_use]
    pub fn broker_account(&self) -> &str {
        &self.info.broker_account
    }

    /// Get the client id.
    #[must_use]
    pub fn broker_clientid(&self) -> &str {
        &self.info.broker_clientid
    }

    /// Get the broker permanent reference.
    #[must_use]
    pub fn broker_permid(&self) -> &str {
        &self.info.broker_permid
    }

    /// Get the broker temporary reference.
    #[must_use]
    pub fn broker_tempid(&self) -> &str {
        &self.info.broker_tempid
    }

    /// Get the commission.
    #[must_use]
    pub const fn commission(&self) -> Money {
        self.info.commission
    }

    /// Get the per-leg filled prices.
    #[must_use]
    pub fn leg_filled_price(&self) -> &[Price] {
        &self.info.leg_filled_price
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Set the limit price.
    pub const fn set_limit_price(&mut self, limit_price: Option<Price>) {
        self.info.limit_price = limit_price;
    }

    /// Set the submission time.
    pub const fn set_submit_datetime(&mut self, submit_datetime: Timestamp) {
        self.info.submit_datetime = Some(submit_datetime);
    }

    /// Mark the fill as entered by hand.
    pub const fn set_manual_fill(&mut self, manual_fill: bool) {
        self.info.manual_fill = manual_fill;
    }

    /// Set the algo comment.
    pub fn set_algo_comment(&mut self, comment: impl Into<String>) {
        self.info.algo_comment = comment.into();
    }

    /// Set the broker permanent reference.
    pub fn set_broker_permid(&mut self, permid: impl Into<String>) {
        self.info.broker_permid = permid.into();
    }

    /// Set the client id.
    pub fn set_broker_clientid(&mut self, clientid: impl Into<String>) {
        self.info.broker_clientid = clientid.into();
    }

    /// Set the broker temporary reference.
    pub fn set_broker_tempid(&mut self, tempid: impl Into<String>) {
        self.info.broker_tempid = tempid.into();
    }

    /// Set the commission.
    pub const fn set_commission(&mut self, commission: Money) {
        self.info.commission = commission;
    }

    /// Lock the order.
    pub const fn lock(&mut self) {
        self.core.lock();
    }

    /// Unlock the order.
    pub const fn unlock(&mut self) {
        self.core.unlock();
    }

    /// Mark the order as no longer working.
    pub const fn deactivate(&mut self) {
        self.core.deactivate();
    }

    /// Assign the internal id.
    pub const fn set_order_id(&mut self, order_id: OrderId) {
        self.core.set_order_id(order_id);
    }

    /// Record a child order.
    pub fn add_child(&mut self, child: OrderId) {
        self.core.add_child(child);
    }

    /// Record a cumulative fill.
    ///
    /// # Errors
    ///
    /// Returns `FillExceedsTrade` if the fill overfills any leg.
    pub fn fill_order(
        &mut self,
        fill: TradeQuantity,
        filled_price: Option<Price>,
        fill_datetime: Option<Timestamp>,
    ) -> Result<(), BrokerOrderError> {
        self.core.fill_order(fill, filled_price, fill_datetime)
    }

    // ========================================================================
    // Reconciliation
    // ========================================================================

    /// Copy fill and execution details from the broker's view of this order.
    ///
    /// The matched order's fill replaces ours; commission, permid, algo
    /// comment and per-leg fill prices are copied with it. A fill that
    /// would overfill any leg is rejected and nothing changes.
    pub fn add_execution_details_from_matched_broker_order(
        &mut self,
        matched: &Self,
    ) -> ReconcileOutcome {
        if let Err(err) = self.core.fill_order(
            matched.fill().clone(),
            matched.filled_price(),
            matched.fill_datetime(),
        ) {
            tracing::warn!(
                key = %self.key(),
                order_id = ?self.order_id(),
                trade = %self.trade(),
                matched_fill = %matched.fill(),
                error = %err,
                "Matched broker order fill exceeds trade, not reconciled"
            );
            return ReconcileOutcome::FillExceedsTrade;
        }

        self.info.commission = matched.commission();
        self.info.broker_permid = matched.broker_permid().to_string();
        self.info.algo_comment = matched.algo_comment().to_string();
        self.info.leg_filled_price = matched.leg_filled_price().to_vec();

        ReconcileOutcome::Success
    }

    // ========================================================================
    // Logging
    // ========================================================================

    /// Child span of `parent` carrying this order's identifying fields.
    #[must_use]
    pub fn log_with_attributes(&self, parent: &Span) -> Span {
        let span = tracing::info_span!(
            parent: parent,
            "broker_order",
            strategy_name = %self.strategy_name(),
            instrument_code = %self.instrument_code(),
            contract_order_id = tracing::field::Empty,
            broker_order_id = tracing::field::Empty,
        );
        if let Some(parent_id) = self.parent() {
            span.record("contract_order_id", parent_id.value());
        }
        if let Some(order_id) = self.order_id() {
            span.record("broker_order_id", order_id.value());
        }
        span
    }
}
