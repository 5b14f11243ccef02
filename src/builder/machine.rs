//! Builder for constructing machines.

use crate::builder::error::BuildError;
use crate::config::{MachineConfig, DEFAULT_QUEUE_CAPACITY};
use crate::core::{EventId, EventList, StateId, StateTable};
use crate::engine::{Machine, QueueStorage};
use crate::queue::{EventQueue, LockStrategy, NoLock};
use std::marker::PhantomData;

/// Builder for a [`Machine`] with a fluent API.
///
/// Defaults: name `fsm`, first state as initial state, queue capacity
/// [`DEFAULT_QUEUE_CAPACITY`], no-op final callback, [`NoLock`].
pub struct MachineBuilder<'t, L: LockStrategy = NoLock> {
    states: &'t StateTable,
    events: &'t EventList,
    name: String,
    initial: Option<StateId>,
    queue_capacity: usize,
    on_final: Option<Box<dyn Fn() + Send + Sync>>,
    _lock: PhantomData<L>,
}

impl<'t> MachineBuilder<'t, NoLock> {
    /// Create a builder over the given tables.
    pub fn new(states: &'t StateTable, events: &'t EventList) -> Self {
        Self {
            states,
            events,
            name: "fsm".to_string(),
            initial: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            on_final: None,
            _lock: PhantomData,
        }
    }
}

impl<'t, L: LockStrategy> MachineBuilder<'t, L> {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the initial state (optional).
    pub fn initial(mut self, state: StateId) -> Self {
        self.initial = Some(state);
        self
    }

    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    /// Apply every field of a loaded configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.name = config.name;
        self.queue_capacity = config.queue_capacity;
        self.initial = config.initial_state.map(StateId);
        self
    }

    /// Callback invoked once when the terminal state is reached.
    pub fn on_final<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_final = Some(Box::new(callback));
        self
    }

    /// Switch the queue's locking strategy.
    pub fn lock<M: LockStrategy>(self) -> MachineBuilder<'t, M> {
        MachineBuilder {
            states: self.states,
            events: self.events,
            name: self.name,
            initial: self.initial,
            queue_capacity: self.queue_capacity,
            on_final: self.on_final,
            _lock: PhantomData,
        }
    }

    /// Build the machine. Allocates the queue storage; nothing is
    /// allocated while the machine runs.
    pub fn build(self) -> Result<Machine<'t, L>, BuildError> {
        let initial = match self.initial {
            Some(id) if self.states.get(id).is_none() => {
                return Err(BuildError::UnknownInitialState(id));
            }
            Some(id) => id,
            None => self.states.first().id(),
        };

        if self.queue_capacity == 0 {
            return Err(BuildError::ZeroQueueCapacity);
        }

        let storage: QueueStorage = vec![EventId(0); self.queue_capacity].into_boxed_slice();
        let queue = EventQueue::wrap(storage);

        Ok(Machine::from_parts(
            self.name,
            self.states,
            self.events,
            initial,
            queue,
            self.on_final.unwrap_or_else(|| Box::new(|| {})),
        ))
    }
}
