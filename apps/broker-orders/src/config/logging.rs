//! Logging configuration.

use serde::{Deserialize, Serialize};

/// Formats accepted for `logging.format`.
pub const LOG_FORMATS: [&str; 2] = ["json", "pretty"];

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Output format: `json` or `pretty`.
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl LoggingConfig {
    /// Returns true for human-readable output.
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        self.format.eq_ignore_ascii_case("pretty")
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "json");
        assert!(!config.is_pretty());
    }

    #[test]
    fn pretty_is_case_insensitive() {
        let config = LoggingConfig {
            format: "Pretty".to_string(),
            ..Default::default()
        };
        assert!(config.is_pretty());
    }
}
