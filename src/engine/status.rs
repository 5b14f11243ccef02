//! Engine lifecycle state and per-run reports.

use crate::core::StateId;
use serde::{Deserialize, Serialize};

/// Lifecycle of the engine itself, distinct from user states.
///
/// There is no uninitialized variant: a machine only exists once it has
/// been initialized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineState {
    /// Initialized, no real state entered yet.
    Initial,
    /// Sitting in a state of the table.
    Running(StateId),
    /// Halted for good; only a reset leaves this state.
    Terminated,
}

/// What a single [`run_once`](crate::engine::Machine::run_once) did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    /// Events taken off the queue
    pub dequeued: usize,
    /// Dequeued ids outside the registered event list
    pub unknown: usize,
    /// Events the current state declined, including ones whose target is
    /// not in the state table
    pub ignored: usize,
    /// Transitions taken, including the one into the terminal state
    pub transitions: usize,
    /// The terminal state was reached during this run
    pub terminated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_state_serializes() {
        let json = serde_json::to_string(&EngineState::Running(StateId(3))).unwrap();
        assert_eq!(json, r#"{"Running":3}"#);
        let back: EngineState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EngineState::Running(StateId(3)));
    }

    #[test]
    fn empty_report_is_default() {
        let report = RunReport::default();
        assert_eq!(report.dequeued, 0);
        assert!(!report.terminated);
    }
}
