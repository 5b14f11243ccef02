//! Machine configuration.
//!
//! Everything here is optional at the integrator level: a default config
//! names the machine `fsm`, queues up to [`DEFAULT_QUEUE_CAPACITY`] events
//! and starts in the first state of the table.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of events the queue can hold.
pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

/// Errors that can occur when loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse machine config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Construction-time settings for a [`Machine`](crate::engine::Machine).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineConfig {
    /// Diagnostic name used in logs and diagram titles
    #[serde(default = "default_name")]
    pub name: String,

    /// Number of slots in the event queue
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,

    /// Index of the initial state; the first state when absent
    #[serde(default)]
    pub initial_state: Option<usize>,
}

fn default_name() -> String {
    "fsm".to_string()
}

fn default_queue_capacity() -> usize {
    DEFAULT_QUEUE_CAPACITY
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            initial_state: None,
        }
    }
}

impl MachineConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let config = MachineConfig::from_json("{}").unwrap();
        assert_eq!(config, MachineConfig::default());
        assert_eq!(config.queue_capacity, 8);
    }

    #[test]
    fn fields_override_defaults() {
        let config =
            MachineConfig::from_json(r#"{"name": "door", "queue_capacity": 2, "initial_state": 1}"#)
                .unwrap();
        assert_eq!(config.name, "door");
        assert_eq!(config.queue_capacity, 2);
        assert_eq!(config.initial_state, Some(1));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = MachineConfig::from_json(r#"{"queue_capacity": "lots"}"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn config_survives_json() {
        let config = MachineConfig {
            name: "pump".to_string(),
            queue_capacity: 4,
            initial_state: Some(2),
        };
        let json = config.to_json().unwrap();
        assert_eq!(MachineConfig::from_json(&json).unwrap(), config);
    }
}
