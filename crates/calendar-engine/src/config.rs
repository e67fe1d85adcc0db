//! Engine configuration.
//!
//! Every field has a default, so an empty TOML document is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};

/// Days a recurrence runs for when it has no explicit end date.
pub const DEFAULT_REPEAT_HORIZON_DAYS: i64 = 365;

/// Upper bound on the members one expansion may produce.
pub const DEFAULT_MAX_INSTANCES: usize = 5000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Horizon, in days after the seed's start, used when `repeat_end` is absent.
    pub repeat_horizon_days: i64,
    /// Expansion stops once a family holds this many members.
    pub max_instances: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repeat_horizon_days: DEFAULT_REPEAT_HORIZON_DAYS,
            max_instances: DEFAULT_MAX_INSTANCES,
        }
    }
}

impl EngineConfig {
    /// Parse configuration from a TOML string and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig =
            toml::from_str(content).map_err(|e| CalendarError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.repeat_horizon_days < 0 {
            return Err(CalendarError::Config(format!(
                "repeat_horizon_days must not be negative, got {}",
                self.repeat_horizon_days
            )));
        }
        if self.max_instances == 0 {
            return Err(CalendarError::Config(
                "max_instances must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        let config = EngineConfig::from_toml_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.repeat_horizon_days, 365);
    }

    #[test]
    fn partial_document_overrides_one_field() {
        let config = EngineConfig::from_toml_str("repeat_horizon_days = 3650").unwrap();
        assert_eq!(config.repeat_horizon_days, 3650);
        assert_eq!(config.max_instances, DEFAULT_MAX_INSTANCES);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            EngineConfig::from_toml_str("max_instances = 0"),
            Err(CalendarError::Config(_))
        ));
        assert!(EngineConfig::from_toml_str("repeat_horizon_days = -1").is_err());
        assert!(EngineConfig::from_toml_str("repeat_horizon_days = \"soon\"").is_err());
    }
}
