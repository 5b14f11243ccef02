//! Core state machine types.
//!
//! This module contains the static topology of a machine:
//! - Events and the registered event list
//! - States with optional entry/exit hooks
//! - One transition rule per state
//!
//! Nothing in here mutates once built; the engine only reads it.

mod event;
mod state;
mod transition;

pub use event::{Event, EventId, EventList};
pub use state::{StateDef, StateId, StateTable};
pub use transition::{Target, Transition};
