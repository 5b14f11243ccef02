//! Build errors for state tables, event lists and machines.

use crate::config::ConfigError;
use crate::core::{EventId, StateId};
use thiserror::Error;

/// Errors that can occur when building a machine or its tables.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("State table is empty. Add at least one state")]
    EmptyStateTable,

    #[error("State at index {index} has id {id}; state ids must equal their index")]
    StateIdMismatch { index: usize, id: StateId },

    #[error("Event at index {index} has id {id}; event ids must equal their index")]
    EventIdMismatch { index: usize, id: EventId },

    #[error("Initial state {0} is not in the state table")]
    UnknownInitialState(StateId),

    #[error("Event queue capacity must be at least 1")]
    ZeroQueueCapacity,

    #[error("Invalid machine config: {0}")]
    Config(#[from] ConfigError),
}
