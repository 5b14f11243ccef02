//! evqfsm: a small embeddable finite state machine runtime
//!
//! A machine runs over a fixed topology supplied at initialization and is
//! driven by a bounded event queue. Producers push event ids; the owner
//! calls [`Machine::run_once`] to drain the queue cooperatively.
//!
//! # Core Concepts
//!
//! - **Events**: integer ids with a diagnostic name, registered once
//! - **States**: optional entry/exit hooks plus a single transition rule
//! - **Transitions**: pure functions from an event to the next state, the
//!   terminal pseudo-state, or nothing
//! - **Event queue**: fixed-capacity ring buffer with an injectable lock
//!
//! # Example
//!
//! ```rust
//! use evqfsm::core::{Event, EventList, StateDef, StateTable, Target, Transition};
//! use evqfsm::{id_enum, EngineState, Machine};
//!
//! id_enum! {
//!     enum Light: StateId { Red, Green }
//! }
//! id_enum! {
//!     enum Signal: EventId { Next, Shutdown }
//! }
//!
//! let events = EventList::new(
//!     Signal::ALL.iter().map(|s| Event::new(*s, s.name())).collect(),
//! )
//! .unwrap();
//! let states = StateTable::new(vec![
//!     StateDef::new(Light::Red.into(), "Red", Transition::from_table("ToGreen", [
//!         (Signal::Next.into(), Target::State(Light::Green.into())),
//!     ])),
//!     StateDef::new(Light::Green.into(), "Green", Transition::from_table("ToRed", [
//!         (Signal::Next.into(), Target::State(Light::Red.into())),
//!         (Signal::Shutdown.into(), Target::Terminate),
//!     ])),
//! ])
//! .unwrap();
//!
//! let mut machine = Machine::init("light", &states, None, &events).unwrap();
//! machine.enqueue_id(Signal::Next.into()).unwrap();
//! machine.run_once();
//! assert_eq!(machine.state(), EngineState::Running(Light::Green.into()));
//!
//! machine.enqueue_id(Signal::Shutdown.into()).unwrap();
//! assert!(machine.run_once().terminated);
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod diagram;
pub mod engine;
pub mod queue;

// Re-export commonly used types
pub use builder::{BuildError, MachineBuilder};
pub use config::MachineConfig;
pub use crate::core::{Event, EventId, EventList, StateDef, StateId, StateTable, Target, Transition};
pub use engine::{EngineState, EventSender, Machine, RunReport};
pub use queue::{EventQueue, MutexLock, NoLock, QueueError};
