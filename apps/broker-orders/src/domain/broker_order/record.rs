//! Persisted form of a broker order.
//!
//! The record is a flat dictionary: order fields at the top level with the
//! broker details alongside them. Reading accepts records written by older
//! versions, where prices may be per-leg lists, broker ids may be numbers
//! and most broker fields may be missing.

use serde::{Deserialize, Deserializer, Serialize};

use super::aggregate::{BrokerOrder, BrokerOrderParams};
use super::errors::BrokerOrderError;
use super::value_objects::{BrokerOrderType, PriceShape, TradeQuantity};
use crate::domain::shared::{Money, OrderId, Price, Timestamp};

/// Dictionary form of a [`BrokerOrder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerOrderRecord {
    /// `strategy/instrument/contract_date_key`.
    pub key: String,
    /// Desired trade.
    pub trade: TradeQuantity,
    /// Fill so far.
    pub fill: Option<TradeQuantity>,
    /// Filled price, scalar or legacy per-leg.
    pub filled_price: Option<PriceShape>,
    /// Latest fill time.
    pub fill_datetime: Option<Timestamp>,
    /// Locked flag.
    pub locked: bool,
    /// Internal id, `null` when unassigned.
    pub order_id: Option<OrderId>,
    /// Parent id, `null` when none.
    pub parent: Option<OrderId>,
    /// Child ids, `null` when none.
    pub children: Option<Vec<OrderId>>,
    /// Active flag.
    pub active: bool,
    /// Order type tag; market when absent.
    #[serde(default)]
    pub order_type: Option<String>,
    /// Broker details.
    #[serde(flatten)]
    pub info: StoredOrderInfo,
}

/// Broker details as stored next to the order fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredOrderInfo {
    /// Algo that generated the order.
    #[serde(deserialize_with = "lenient_string")]
    pub algo_used: String,
    /// Algo comment.
    #[serde(deserialize_with = "lenient_string")]
    pub algo_comment: String,
    /// Submission time.
    pub submit_datetime: Option<Timestamp>,
    /// Limit price.
    pub limit_price: Option<Price>,
    /// Side price.
    pub side_price: Option<PriceShape>,
    /// Mid price.
    pub mid_price: Option<PriceShape>,
    /// Offside price.
    pub offside_price: Option<PriceShape>,
    /// Manual fill flag.
    pub manual_fill: Option<bool>,
    /// Roll order flag.
    pub roll_order: Option<bool>,
    /// Written for readers of the stored form; recomputed on load.
    pub calendar_spread_order: Option<bool>,
    /// Broker name.
    #[serde(deserialize_with = "lenient_string")]
    pub broker: String,
    /// Brokerage account.
    #[serde(deserialize_with = "lenient_string")]
    pub broker_account: String,
    /// Client id.
    #[serde(deserialize_with = "lenient_string")]
    pub broker_clientid: String,
    /// Broker permanent reference.
    #[serde(deserialize_with = "lenient_string")]
    pub broker_permid: String,
    /// Broker temporary reference.
    #[serde(deserialize_with = "lenient_string")]
    pub broker_tempid: String,
    /// Commission.
    pub commission: Option<Money>,
    /// Per-leg filled prices.
    pub leg_filled_price: Option<Vec<Price>>,
}

/// Read a string field that older records may hold as a number or null.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Stored {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match Option::<Stored>::deserialize(deserializer)? {
        None => String::new(),
        Some(Stored::Text(text)) => text,
        Some(Stored::Integer(value)) => value.to_string(),
        Some(Stored::Float(value)) => value.to_string(),
    })
}

impl BrokerOrder {
    /// Convert to the persisted dictionary form.
    #[must_use]
    pub fn to_dict(&self) -> BrokerOrderRecord {
        let info = self.info();
        BrokerOrderRecord {
            key: self.key(),
            trade: self.trade().clone(),
            fill: Some(self.fill().clone()),
            filled_price: self.filled_price().map(PriceShape::Scalar),
            fill_datetime: self.fill_datetime(),
            locked: self.is_locked(),
            order_id: self.order_id(),
            parent: self.parent(),
            children: (!self.children().is_empty()).then(|| self.children().to_vec()),
            active: self.is_active(),
            order_type: Some(self.order_type().as_str().to_string()),
            info: StoredOrderInfo {
                algo_used: info.algo_used.clone(),
                algo_comment: info.algo_comment.clone(),
                submit_datetime: info.submit_datetime,
                limit_price: info.limit_price,
                side_price: info.side_price.map(PriceShape::Scalar),
                mid_price: info.mid_price.map(PriceShape::Scalar),
                offside_price: info.offside_price.map(PriceShape::Scalar),
                manual_fill: Some(info.manual_fill),
                roll_order: Some(info.roll_order),
                calendar_spread_order: Some(info.calendar_spread_order),
                broker: info.broker.clone(),
                broker_account: info.broker_account.clone(),
                broker_clientid: info.broker_clientid.clone(),
                broker_permid: info.broker_permid.clone(),
                broker_tempid: info.broker_tempid.clone(),
                commission: Some(info.commission),
                leg_filled_price: Some(info.leg_filled_price.clone()),
            },
        }
    }

    /// Rebuild from the persisted dictionary form.
    ///
    /// The record goes through the same normalization as any other
    /// construction, so legacy per-leg prices come back in canonical form.
    /// A stored `calendar_spread_order` is ignored.
    ///
    /// # Errors
    ///
    /// - `InvalidOrderType` for an unknown order type tag.
    /// - Any construction error from [`BrokerOrder::from_key`].
    pub fn from_dict(record: BrokerOrderRecord) -> Result<Self, BrokerOrderError> {
        let order_type = record
            .order_type
            .as_deref()
            .map(str::parse::<BrokerOrderType>)
            .transpose()?
            .unwrap_or_default();
        let info = record.info;

        let params = BrokerOrderParams {
            fill: record.fill,
            filled_price: record.filled_price,
            leg_filled_price: info.leg_filled_price.unwrap_or_default(),
            fill_datetime: record.fill_datetime,
            locked: record.locked,
            order_id: record.order_id,
            parent: record.parent,
            children: record.children.unwrap_or_default(),
            active: record.active,
            order_type,
            algo_used: info.algo_used,
            algo_comment: info.algo_comment,
            submit_datetime: info.submit_datetime,
            limit_price: info.limit_price,
            side_price: info.side_price,
            mid_price: info.mid_price,
            offside_price: info.offside_price,
            manual_fill: info.manual_fill.unwrap_or(false),
            roll_order: info.roll_order.unwrap_or(false),
            broker: info.broker,
            broker_account: info.broker_account,
            broker_clientid: info.broker_clientid,
            broker_permid: info.broker_permid,
            broker_tempid: info.broker_tempid,
            commission: info.commission.unwrap_or_default(),
        };

        Self::from_key(&record.key, record.trade, params)
    }

    /// Serialize the dictionary form to JSON.
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` if serde fails, which the record types do
    /// not trigger in practice.
    pub fn to_json(&self) -> Result<serde_json::Value, BrokerOrderError> {
        Ok(serde_json::to_value(self.to_dict())?)
    }

    /// Parse a JSON dictionary and rebuild the order.
    ///
    /// # Errors
    ///
    /// Returns `Deserialization` for a malformed or incomplete dictionary,
    /// otherwise see [`BrokerOrder::from_dict`].
    pub fn from_json(value: serde_json::Value) -> Result<Self, BrokerOrderError> {
        let record: BrokerOrderRecord = serde_json::from_value(value)?;
        Self::from_dict(record)
    }
}
