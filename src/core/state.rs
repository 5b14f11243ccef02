//! States and the state table.
//!
//! A state bundles a name, optional entry/exit hooks and its single
//! transition rule. The [`StateTable`] is the immutable registry the engine
//! runs against.

use super::transition::Transition;
use crate::builder::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a state; equal to its index in the owning [`StateTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(pub usize);

impl StateId {
    pub const fn from_index(index: usize) -> Self {
        StateId(index)
    }

    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

type Hook = Box<dyn Fn() + Send + Sync>;

/// A state of the machine.
///
/// Hooks are optional; an absent hook behaves as a no-op.
///
/// # Example
///
/// ```rust
/// use evqfsm::core::{EventId, StateDef, StateId, Target, Transition};
///
/// let idle = StateDef::new(
///     StateId(0),
///     "Idle",
///     Transition::from_table("Guard_Idle", [(EventId(0), Target::State(StateId(1)))]),
/// )
/// .on_entry(|| println!("idle"))
/// .on_exit(|| println!("leaving idle"));
///
/// assert_eq!(idle.name(), "Idle");
/// assert!(idle.has_entry_hook());
/// ```
pub struct StateDef {
    id: StateId,
    name: &'static str,
    on_entry: Option<Hook>,
    on_exit: Option<Hook>,
    transition: Transition,
}

impl StateDef {
    pub fn new(id: StateId, name: &'static str, transition: Transition) -> Self {
        Self {
            id,
            name,
            on_entry: None,
            on_exit: None,
            transition,
        }
    }

    /// Action performed upon entry to the state.
    pub fn on_entry<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_entry = Some(Box::new(hook));
        self
    }

    /// Action performed upon exit from the state.
    pub fn on_exit<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_exit = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn transition(&self) -> &Transition {
        &self.transition
    }

    pub fn has_entry_hook(&self) -> bool {
        self.on_entry.is_some()
    }

    pub fn has_exit_hook(&self) -> bool {
        self.on_exit.is_some()
    }

    pub(crate) fn enter(&self) {
        if let Some(hook) = &self.on_entry {
            hook();
        }
    }

    pub(crate) fn exit(&self) {
        if let Some(hook) = &self.on_exit {
            hook();
        }
    }
}

impl fmt::Debug for StateDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDef")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("on_entry", &self.on_entry.is_some())
            .field("on_exit", &self.on_exit.is_some())
            .field("transition", &self.transition)
            .finish()
    }
}

/// Ordered, immutable registry of states.
#[derive(Debug)]
pub struct StateTable {
    states: Vec<StateDef>,
}

impl StateTable {
    /// Create a state table, checking that it is non-empty and that the
    /// state at index `i` has id `i`.
    pub fn new(states: Vec<StateDef>) -> Result<Self, BuildError> {
        if states.is_empty() {
            return Err(BuildError::EmptyStateTable);
        }
        for (index, state) in states.iter().enumerate() {
            if state.id.index() != index {
                return Err(BuildError::StateIdMismatch {
                    index,
                    id: state.id,
                });
            }
        }
        Ok(Self { states })
    }

    pub fn get(&self, id: StateId) -> Option<&StateDef> {
        self.states.get(id.index())
    }

    /// First state of the table; the default initial state.
    pub fn first(&self) -> &StateDef {
        &self.states[0]
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateDef> {
        self.states.iter()
    }
}
