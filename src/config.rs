//! Machine configuration.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of states kept in history.
pub const DEFAULT_MAX_HISTORY_LENGTH: usize = 10;

/// Errors that can occur while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for a [`Machine`](crate::machine::Machine).
///
/// Missing fields take their defaults, so an empty JSON object is a valid
/// configuration.
///
/// # Example
///
/// ```rust
/// use switchyard::config::MachineConfig;
///
/// let config = MachineConfig::from_json(r#"{ "max_history_length": 3 }"#).unwrap();
/// assert_eq!(config.max_history_length, 3);
///
/// let defaults = MachineConfig::from_json("{}").unwrap();
/// assert_eq!(defaults, MachineConfig::default());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MachineConfig {
    /// Maximum number of states kept in history. `0` disables history.
    pub max_history_length: usize,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            max_history_length: DEFAULT_MAX_HISTORY_LENGTH,
        }
    }
}

impl MachineConfig {
    pub fn new(max_history_length: usize) -> Self {
        Self { max_history_length }
    }

    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }
}
