//! Random Event Driver
//!
//! Feeds random events into the four-state example machine at a fixed
//! pace until it terminates, and writes the topology as a PlantUML file.
//!
//! Run with: RUST_LOG=info cargo run --example random_driver

use evqfsm::core::{Event, EventList, StateDef, StateTable, Target, Transition};
use evqfsm::{id_enum, Machine};
use rand::Rng;
use std::fs::File;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

id_enum! {
    enum Ex: StateId {
        State0,
        State1,
        State2,
        State3,
    }
}

id_enum! {
    enum ExEvent: EventId {
        Event0,
        Event1,
        Event2,
        Event3,
    }
}

const POLL_INTERVAL: Duration = Duration::from_millis(100);

fn init_logger(log_level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true))
        .init();
}

fn guard(state: Ex, event: &Event) -> Option<Target> {
    let event = event.id.index().and_then(|i| ExEvent::ALL.get(i).copied())?;
    match (state, event) {
        (Ex::State0, ExEvent::Event1) => Some(Target::State(Ex::State1.into())),
        (Ex::State1, ExEvent::Event1) => Some(Target::State(Ex::State1.into())),
        (Ex::State1, ExEvent::Event2) => Some(Target::State(Ex::State2.into())),
        (Ex::State2, ExEvent::Event3) => Some(Target::State(Ex::State3.into())),
        (Ex::State3, ExEvent::Event0) => Some(Target::State(Ex::State0.into())),
        (Ex::State3, ExEvent::Event2) => Some(Target::Terminate),
        _ => None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logger("info");

    let events = EventList::new(
        ExEvent::ALL
            .iter()
            .map(|event| Event::new(*event, event.name()))
            .collect(),
    )?;
    let states = StateTable::new(
        Ex::ALL
            .iter()
            .map(|state| {
                let state = *state;
                let name = ["Guard_0", "Guard_1", "Guard_2", "Guard_3"][state.index()];
                StateDef::new(
                    state.into(),
                    state.name(),
                    Transition::new(name, move |event: &Event| guard(state, event)),
                )
            })
            .collect(),
    )?;

    let done = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&done);
    let mut machine = Machine::builder(&states, &events)
        .name("ex")
        .on_final(move || flag.store(true, Ordering::SeqCst))
        .build()?;

    let mut file = File::create("fsm_ex_dia.plantuml")?;
    evqfsm::diagram::write_plantuml(&machine, &mut file)?;

    let mut rng = rand::thread_rng();
    while !done.load(Ordering::SeqCst) {
        let event = ExEvent::ALL[rng.gen_range(0..ExEvent::ALL.len())];
        if machine.enqueue_id(event.into()).is_err() {
            tracing::warn!(event = event.name(), "queue full, event dropped");
        }
        machine.run_once();
        thread::sleep(POLL_INTERVAL);
    }

    println!("machine `{}` terminated", machine.name());
    Ok(())
}
