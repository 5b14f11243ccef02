//! Basic State Machine
//!
//! This demo builds a small door controller and steps it by hand.
//!
//! Key concepts:
//! - Dense state and event ids via `id_enum!`
//! - Table-driven transition rules
//! - Entry/exit hooks
//! - Cooperative draining with `run_once`
//!
//! Run with: cargo run --example basic_state_machine

use evqfsm::core::{Event, EventList, StateDef, StateTable, Target, Transition};
use evqfsm::{id_enum, Machine};

id_enum! {
    enum Door: StateId {
        Closed,
        Open,
        Locked,
    }
}

id_enum! {
    enum DoorEvent: EventId {
        Push,
        Pull,
        Lock,
        Unlock,
        Demolish,
    }
}

fn state(door: Door, rule: Transition) -> StateDef {
    StateDef::new(door.into(), door.name(), rule)
        .on_entry(move || println!("  -> entered {}", door.name()))
        .on_exit(move || println!("  <- left {}", door.name()))
}

fn go(door: Door) -> Target {
    Target::State(door.into())
}

fn main() {
    println!("=== Basic State Machine Example ===\n");

    let events = EventList::new(
        DoorEvent::ALL
            .iter()
            .map(|event| Event::new(*event, event.name()))
            .collect(),
    )
    .unwrap();

    let states = StateTable::new(vec![
        state(
            Door::Closed,
            Transition::from_table(
                "Closed",
                [
                    (DoorEvent::Push.into(), go(Door::Open)),
                    (DoorEvent::Lock.into(), go(Door::Locked)),
                ],
            ),
        ),
        state(
            Door::Open,
            Transition::from_table("Open", [(DoorEvent::Pull.into(), go(Door::Closed))]),
        ),
        state(
            Door::Locked,
            Transition::from_table(
                "Locked",
                [
                    (DoorEvent::Unlock.into(), go(Door::Closed)),
                    (DoorEvent::Demolish.into(), Target::Terminate),
                ],
            ),
        ),
    ])
    .unwrap();

    let mut machine = Machine::init("door", &states, None, &events).unwrap();
    machine.register_final_callback(|| println!("  door is gone"));

    println!("Topology:\n{}", machine.diagram());

    machine.run_once();
    for event in [
        DoorEvent::Push,
        DoorEvent::Lock,
        DoorEvent::Pull,
        DoorEvent::Lock,
        DoorEvent::Demolish,
    ] {
        println!("event {}", event.name());
        machine.enqueue_id(event.into()).unwrap();
        let report = machine.run_once();
        println!("  {report:?}");
    }

    println!("\nFinal engine state: {:?}", machine.state());
    println!("\n=== Example Complete ===");
}
