//! Default broker identity for new broker orders.

use serde::{Deserialize, Serialize};

use crate::domain::broker_order::BrokerSubmission;

/// Broker the orders are routed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrokerConfig {
    /// Broker name.
    #[serde(default = "default_broker_name")]
    pub name: String,
    /// Brokerage account.
    #[serde(default)]
    pub account: String,
    /// Client id used when placing orders.
    #[serde(default)]
    pub client_id: String,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            name: default_broker_name(),
            account: String::new(),
            client_id: String::new(),
        }
    }
}

impl BrokerConfig {
    /// Submission context carrying this broker's identity and nothing else.
    #[must_use]
    pub fn default_submission(&self) -> BrokerSubmission {
        BrokerSubmission {
            broker: self.name.clone(),
            broker_account: self.account.clone(),
            broker_clientid: self.client_id.clone(),
            ..BrokerSubmission::default()
        }
    }
}

fn default_broker_name() -> String {
    "IB".to_string()
}
