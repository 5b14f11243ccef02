//! Shared four-state topology used by the integration tests.
//!
//! S0 --E1--> S1, S1 --E1--> S1, S1 --E2--> S2, S2 --E3--> S3,
//! S3 --E0--> S0, S3 --E2--> terminate.

#![allow(dead_code)]

use evqfsm::core::{Event, EventList, StateDef, StateId, StateTable, Target, Transition};
use parking_lot::Mutex;
use std::sync::Arc;

pub type Log = Arc<Mutex<Vec<String>>>;

pub const STATE_NAMES: [&str; 4] = ["State_0", "State_1", "State_2", "State_3"];
pub const GUARD_NAMES: [&str; 4] = ["Guard_0", "Guard_1", "Guard_2", "Guard_3"];
pub const EVENT_NAMES: [&str; 4] = ["Event_0", "Event_1", "Event_2", "Event_3"];

/// The transition rule of `state`, as a plain function.
pub fn rule(state: usize, event: i32) -> Option<Target> {
    match (state, event) {
        (0, 1) => Some(Target::State(StateId(1))),
        (1, 1) => Some(Target::State(StateId(1))),
        (1, 2) => Some(Target::State(StateId(2))),
        (2, 3) => Some(Target::State(StateId(3))),
        (3, 0) => Some(Target::State(StateId(0))),
        (3, 2) => Some(Target::Terminate),
        _ => None,
    }
}

pub fn events() -> EventList {
    let events = EVENT_NAMES
        .iter()
        .enumerate()
        .map(|(id, name)| Event::new(id as i32, *name))
        .collect();
    EventList::new(events).unwrap()
}

pub fn states(log: &Log) -> StateTable {
    let states = (0..4)
        .map(|index| {
            let (entry, exit) = (Arc::clone(log), Arc::clone(log));
            StateDef::new(
                StateId(index),
                STATE_NAMES[index],
                Transition::new(GUARD_NAMES[index], move |event: &Event| {
                    rule(index, event.id.0)
                }),
            )
            .on_entry(move || entry.lock().push(format!("entry(S{index})")))
            .on_exit(move || exit.lock().push(format!("exit(S{index})")))
        })
        .collect();
    StateTable::new(states).unwrap()
}

pub fn take(log: &Log) -> Vec<String> {
    std::mem::take(&mut *log.lock())
}
