//! The FSM engine: drains the event queue against the current state's rule.

use super::sender::EventSender;
use super::status::{EngineState, RunReport};
use crate::builder::{BuildError, MachineBuilder};
use crate::core::{Event, EventId, EventList, StateDef, StateId, StateTable, Target};
use crate::queue::{EventQueue, LockStrategy, NoLock, QueueError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Backing storage of a machine's event queue, allocated once at build time.
pub type QueueStorage = Box<[EventId]>;

pub(crate) type FinalCallback = Box<dyn Fn() + Send + Sync>;

/// A running finite state machine over borrowed, immutable tables.
///
/// `state` is the only field that changes while events are processed.
///
/// # Example
///
/// ```rust
/// use evqfsm::core::{Event, EventId, EventList, StateDef, StateId, StateTable, Target, Transition};
/// use evqfsm::engine::{EngineState, Machine};
///
/// let events = EventList::new(vec![Event::new(0, "Toggle"), Event::new(1, "Off")]).unwrap();
/// let states = StateTable::new(vec![
///     StateDef::new(StateId(0), "Dark", Transition::from_table("G0", [
///         (EventId(0), Target::State(StateId(1))),
///     ])),
///     StateDef::new(StateId(1), "Lit", Transition::from_table("G1", [
///         (EventId(0), Target::State(StateId(0))),
///         (EventId(1), Target::Terminate),
///     ])),
/// ])
/// .unwrap();
///
/// let mut machine = Machine::init("lamp", &states, None, &events).unwrap();
/// machine.run_once();
/// assert_eq!(machine.state(), EngineState::Running(StateId(0)));
///
/// machine.enqueue(&Event::new(0, "Toggle")).unwrap();
/// machine.run_once();
/// assert_eq!(machine.current_state().map(|s| s.name()), Some("Lit"));
///
/// machine.enqueue_id(EventId(1)).unwrap();
/// let report = machine.run_once();
/// assert!(report.terminated);
/// assert!(machine.is_terminated());
/// ```
pub struct Machine<'t, L: LockStrategy = NoLock> {
    name: String,
    state: EngineState,
    init_state: StateId,
    states: &'t StateTable,
    events: &'t EventList,
    final_callback: FinalCallback,
    queue: Arc<EventQueue<QueueStorage, L>>,
}

impl<'t> Machine<'t, NoLock> {
    /// Initialize a machine with default settings.
    ///
    /// `init_state` defaults to the first entry of `states`.
    pub fn init(
        name: impl Into<String>,
        states: &'t StateTable,
        init_state: Option<StateId>,
        events: &'t EventList,
    ) -> Result<Self, BuildError> {
        let builder = MachineBuilder::new(states, events).name(name);
        match init_state {
            Some(id) => builder.initial(id).build(),
            None => builder.build(),
        }
    }

    pub fn builder(states: &'t StateTable, events: &'t EventList) -> MachineBuilder<'t, NoLock> {
        MachineBuilder::new(states, events)
    }
}

impl<'t, L: LockStrategy> Machine<'t, L> {
    pub(crate) fn from_parts(
        name: String,
        states: &'t StateTable,
        events: &'t EventList,
        init_state: StateId,
        queue: EventQueue<QueueStorage, L>,
        final_callback: FinalCallback,
    ) -> Self {
        Self {
            name,
            state: EngineState::Initial,
            init_state,
            states,
            events,
            final_callback,
            queue: Arc::new(queue),
        }
    }

    /// Replace the terminal-state callback. The last registration wins.
    pub fn register_final_callback<F>(&mut self, callback: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.final_callback = Box::new(callback);
    }

    /// Queue a registered event. Returns its id on success.
    pub fn enqueue(&self, event: &Event) -> Result<EventId, QueueError> {
        self.enqueue_id(event.id)
    }

    /// Queue a raw event id. Unregistered ids are accepted here and dropped
    /// when dequeued.
    pub fn enqueue_id(&self, id: EventId) -> Result<EventId, QueueError> {
        self.queue.put(id).map(|()| id)
    }

    /// Handle for producers that submit events without borrowing the
    /// machine.
    pub fn sender(&self) -> EventSender<L> {
        EventSender::new(Arc::clone(&self.queue))
    }

    /// Drain the queue, one event at a time, against the current state.
    ///
    /// Returns when the queue is empty or the terminal state is reached.
    /// The first call after init enters the initial state.
    pub fn run_once(&mut self) -> RunReport {
        let mut report = RunReport::default();

        if self.state == EngineState::Initial {
            self.enter_initial_state();
        }

        while let Ok(id) = self.queue.get() {
            report.dequeued += 1;

            let Some(event) = self.events.get(id) else {
                warn!(fsm = %self.name, event_id = %id, "dropping unknown event id");
                report.unknown += 1;
                continue;
            };

            debug!(fsm = %self.name, event = event.name, "received event");

            let EngineState::Running(current) = self.state else {
                warn!(fsm = %self.name, event = event.name, "machine has terminated, event discarded");
                return report;
            };
            let Some(source) = self.states.get(current) else {
                error!(fsm = %self.name, state = %current, "current state is not in the state table");
                return report;
            };

            let Some(target) = source.transition().evaluate(event) else {
                debug!(
                    fsm = %self.name,
                    state = source.name(),
                    event = event.name,
                    "no transition, event ignored"
                );
                report.ignored += 1;
                continue;
            };

            match target {
                Target::Terminate => {
                    info!(
                        fsm = %self.name,
                        from = source.name(),
                        event = event.name,
                        to = "[*]",
                        "transition"
                    );
                    source.exit();
                    self.state = EngineState::Terminated;
                    report.transitions += 1;
                    report.terminated = true;
                    info!(fsm = %self.name, "reached terminal state");
                    (self.final_callback)();
                    return report;
                }
                Target::State(next_id) => {
                    let Some(next) = self.states.get(next_id) else {
                        error!(
                            fsm = %self.name,
                            from = source.name(),
                            event = event.name,
                            target = %next_id,
                            "transition target is not in the state table, event dropped"
                        );
                        report.ignored += 1;
                        continue;
                    };
                    info!(
                        fsm = %self.name,
                        from = source.name(),
                        event = event.name,
                        to = next.name(),
                        "transition"
                    );
                    source.exit();
                    self.state = EngineState::Running(next_id);
                    next.enter();
                    report.transitions += 1;
                }
            }
        }

        report
    }

    fn enter_initial_state(&mut self) {
        let Some(initial) = self.states.get(self.init_state) else {
            error!(fsm = %self.name, state = %self.init_state, "initial state is not in the state table");
            return;
        };
        info!(fsm = %self.name, state = initial.name(), "entering initial state");
        self.state = EngineState::Running(self.init_state);
        initial.enter();
    }

    /// Return to the pre-start state and drop every queued event.
    ///
    /// The next [`run_once`](Self::run_once) enters the initial state again
    /// and the final callback may fire once more.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.state = EngineState::Initial;
        info!(fsm = %self.name, "machine reset");
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// The real state the machine is in, if it has started and not yet
    /// terminated.
    pub fn current_state(&self) -> Option<&'t StateDef> {
        match self.state {
            EngineState::Running(id) => self.states.get(id),
            EngineState::Initial | EngineState::Terminated => None,
        }
    }

    pub fn initial_state(&self) -> StateId {
        self.init_state
    }

    pub fn is_terminated(&self) -> bool {
        self.state == EngineState::Terminated
    }

    pub fn states(&self) -> &'t StateTable {
        self.states
    }

    pub fn events(&self) -> &'t EventList {
        self.events
    }

    /// Number of events waiting in the queue.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue_capacity(&self) -> usize {
        self.queue.capacity()
    }
}

impl<L: LockStrategy> fmt::Debug for Machine<'_, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Machine")
            .field("name", &self.name)
            .field("state", &self.state)
            .field("init_state", &self.init_state)
            .field("states", &self.states.len())
            .field("events", &self.events.len())
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}
