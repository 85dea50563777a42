//! Fill reconciliation configuration.

use serde::{Deserialize, Serialize};

/// How bulk fill reconciliation reacts to bad matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconciliationConfig {
    /// Stop the batch at the first matched fill that exceeds its trade.
    #[serde(default)]
    pub halt_on_fill_exceeds_trade: bool,
}
