//! The FSM engine.
//!
//! A [`Machine`] owns the event queue and a pointer into its state table.
//! Producers push event ids; [`Machine::run_once`] drains them against the
//! current state's transition rule, firing exit and entry hooks around each
//! taken edge.
//!
//! Execution is cooperative: `run_once` never blocks and returns as soon as
//! the queue is empty or the terminal state is reached. Pacing and
//! re-invocation are up to the caller.

mod machine;
mod sender;
mod status;

pub use machine::{Machine, QueueStorage};
pub use sender::EventSender;
pub use status::{EngineState, RunReport};
