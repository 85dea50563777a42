//! Tradeable object keys: strategy, instrument and contract legs.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::broker_order::errors::BrokerOrderError;

/// Separates strategy, instrument and contract components of a key.
pub const KEY_SEPARATOR: char = '/';

/// Separates contract dates of a multi-leg key.
pub const CONTRACT_SEPARATOR: char = '_';

/// A contract month (`YYYYMM`) or contract date (`YYYYMMDD`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContractDate(String);

impl ContractDate {
    /// Parse a contract date.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` unless the value is `YYYYMM` with a month in
    /// `01..=12`, or `YYYYMMDD` naming a calendar day. Day `00` means the
    /// month alone.
    pub fn parse(value: impl Into<String>) -> Result<Self, BrokerOrderError> {
        let value = value.into();
        if !is_contract_date(&value) {
            return Err(BrokerOrderError::InvalidKey {
                key: value,
                message: "contract date must be YYYYMM or YYYYMMDD".to_string(),
            });
        }
        Ok(Self(value))
    }

    /// The date as supplied.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Comparable `YYYYMMDD` form; a bare month sorts as day `00`.
    #[must_use]
    pub fn sort_key(&self) -> String {
        if self.0.len() == 6 {
            format!("{}00", self.0)
        } else {
            self.0.clone()
        }
    }
}

fn is_contract_date(value: &str) -> bool {
    if !(value.len() == 6 || value.len() == 8) || !value.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let (Ok(year), Ok(month)) = (value[..4].parse::<i32>(), value[4..6].parse::<u32>()) else {
        return false;
    };
    if !(1..=12).contains(&month) {
        return false;
    }
    match value.get(6..) {
        None | Some("" | "00") => true,
        Some(day) => day
            .parse::<u32>()
            .ok()
            .and_then(|day| NaiveDate::from_ymd_opt(year, month, day))
            .is_some(),
    }
}

impl fmt::Display for ContractDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ContractDate {
    type Error = BrokerOrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<ContractDate> for String {
    fn from(value: ContractDate) -> Self {
        value.0
    }
}

/// Contract component of the four-argument order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContractId {
    /// One contract date (may itself hold `_`-joined legs).
    Single(String),
    /// One contract date per leg.
    Legs(Vec<String>),
}

impl ContractId {
    fn into_dates(self) -> Result<Vec<ContractDate>, BrokerOrderError> {
        let raw: Vec<String> = match self {
            Self::Single(id) => id.split(CONTRACT_SEPARATOR).map(str::to_string).collect(),
            Self::Legs(ids) => ids,
        };
        raw.into_iter().map(ContractDate::parse).collect()
    }
}

impl From<&str> for ContractId {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for ContractId {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<&str>> for ContractId {
    fn from(value: Vec<&str>) -> Self {
        Self::Legs(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for ContractId {
    fn from(value: Vec<String>) -> Self {
        Self::Legs(value)
    }
}

/// Strategy plus instrument, without contract legs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstrumentStrategy {
    /// Strategy name.
    pub strategy_name: String,
    /// Instrument code.
    pub instrument_code: String,
}

impl InstrumentStrategy {
    /// `strategy/instrument`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{KEY_SEPARATOR}{}", self.strategy_name, self.instrument_code)
    }
}

/// Instrument plus contract legs, without strategy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FuturesContract {
    /// Instrument code.
    pub instrument_code: String,
    /// Contract legs.
    pub contract_dates: Vec<ContractDate>,
}

impl FuturesContract {
    /// True if the contract spans more than one date.
    #[must_use]
    pub fn is_spread_contract(&self) -> bool {
        self.contract_dates.len() > 1
    }
}

/// What a broker order trades: strategy, instrument and one or more
/// contract dates.
///
/// Keys look like `strategy/instrument/201003` or, for spreads,
/// `strategy/instrument/201003_201406`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FuturesContractStrategy {
    strategy_name: String,
    instrument_code: String,
    contract_dates: Vec<ContractDate>,
}

impl FuturesContractStrategy {
    /// Build from components.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for empty names, names containing `/`, malformed
    /// dates or a contract date that appears on more than one leg.
    pub fn new(
        strategy_name: impl Into<String>,
        instrument_code: impl Into<String>,
        contract_id: impl Into<ContractId>,
    ) -> Result<Self, BrokerOrderError> {
        let strategy_name = strategy_name.into();
        let instrument_code = instrument_code.into();
        let contract_dates = contract_id.into().into_dates()?;

        let object = Self {
            strategy_name,
            instrument_code,
            contract_dates,
        };
        object.validate()?;
        Ok(object)
    }

    /// Parse a `strategy/instrument/contract_date_key` string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` unless the key has exactly three components.
    pub fn from_key(key: &str) -> Result<Self, BrokerOrderError> {
        let parts: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        let [strategy, instrument, contracts] = parts.as_slice() else {
            return Err(BrokerOrderError::InvalidKey {
                key: key.to_string(),
                message: "expected strategy/instrument/contract_id".to_string(),
            });
        };
        Self::new(*strategy, *instrument, *contracts)
    }

    fn validate(&self) -> Result<(), BrokerOrderError> {
        let invalid = |message: &str| BrokerOrderError::InvalidKey {
            key: self.key(),
            message: message.to_string(),
        };

        if self.strategy_name.is_empty() || self.instrument_code.is_empty() {
            return Err(invalid("strategy and instrument must be non-empty"));
        }
        if [&self.strategy_name, &self.instrument_code]
            .iter()
            .any(|name| name.contains(KEY_SEPARATOR))
        {
            return Err(invalid("strategy and instrument must not contain '/'"));
        }
        if self.contract_dates.is_empty() {
            return Err(invalid("at least one contract date is required"));
        }
        let mut keys: Vec<String> = self.contract_dates.iter().map(ContractDate::sort_key).collect();
        keys.sort();
        keys.dedup();
        if keys.len() != self.contract_dates.len() {
            return Err(invalid("contract dates must be distinct"));
        }
        Ok(())
    }

    /// Strategy name.
    #[must_use]
    pub fn strategy_name(&self) -> &str {
        &self.strategy_name
    }

    /// Instrument code.
    #[must_use]
    pub fn instrument_code(&self) -> &str {
        &self.instrument_code
    }

    /// Contract legs in their current order.
    #[must_use]
    pub fn contract_dates(&self) -> &[ContractDate] {
        &self.contract_dates
    }

    /// Number of contract legs.
    #[must_use]
    pub fn leg_count(&self) -> usize {
        self.contract_dates.len()
    }

    /// Contract dates joined with `_`.
    #[must_use]
    pub fn contract_date_key(&self) -> String {
        self.contract_dates
            .iter()
            .map(ContractDate::as_str)
            .collect::<Vec<_>>()
            .join(&CONTRACT_SEPARATOR.to_string())
    }

    /// Full `strategy/instrument/contract_date_key`.
    #[must_use]
    pub fn key(&self) -> String {
        format!(
            "{}{KEY_SEPARATOR}{}{KEY_SEPARATOR}{}",
            self.strategy_name,
            self.instrument_code,
            self.contract_date_key()
        )
    }

    /// Strategy and instrument.
    #[must_use]
    pub fn instrument_strategy(&self) -> InstrumentStrategy {
        InstrumentStrategy {
            strategy_name: self.strategy_name.clone(),
            instrument_code: self.instrument_code.clone(),
        }
    }

    /// Instrument and contract legs.
    #[must_use]
    pub fn futures_contract(&self) -> FuturesContract {
        FuturesContract {
            instrument_code: self.instrument_code.clone(),
            contract_dates: self.contract_dates.clone(),
        }
    }

    /// Permutation that puts the legs in ascending contract date order.
    ///
    /// Entry `i` is the current index of the leg that belongs at position
    /// `i`. Apply the same permutation to every per-leg sequence.
    #[must_use]
    pub fn sort_idx_for_contracts(&self) -> Vec<usize> {
        let mut idx: Vec<usize> = (0..self.contract_dates.len()).collect();
        idx.sort_by_key(|&i| self.contract_dates[i].sort_key());
        idx
    }

    /// Reorder the legs with a permutation from
    /// [`sort_idx_for_contracts`](Self::sort_idx_for_contracts).
    ///
    /// # Errors
    ///
    /// Returns `LegCountMismatch` if `idx` is not a permutation of the legs.
    pub fn sort_contracts_with_idx(&mut self, idx: &[usize]) -> Result<(), BrokerOrderError> {
        let sorted = apply_sort_idx(&self.contract_dates, idx).ok_or_else(|| {
            BrokerOrderError::LegCountMismatch {
                field: "contract_dates".to_string(),
                expected: self.contract_dates.len(),
                actual: idx.len(),
            }
        })?;
        self.contract_dates = sorted;
        Ok(())
    }
}

/// Apply a leg permutation to any per-leg sequence.
///
/// Returns `None` unless `idx` is a permutation of `0..values.len()`.
#[must_use]
pub fn apply_sort_idx<T: Clone>(values: &[T], idx: &[usize]) -> Option<Vec<T>> {
    if idx.len() != values.len() {
        return None;
    }
    let mut seen = vec![false; values.len()];
    let mut sorted = Vec::with_capacity(values.len());
    for &i in idx {
        let slot = seen.get_mut(i)?;
        if *slot {
            return None;
        }
        *slot = true;
        sorted.push(values[i].clone());
    }
    Some(sorted)
}

impl fmt::Display for FuturesContractStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl TryFrom<String> for FuturesContractStrategy {
    type Error = BrokerOrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_key(&value)
    }
}

impl From<FuturesContractStrategy> for String {
    fn from(value: FuturesContractStrategy) -> Self {
        value.key()
    }
}
