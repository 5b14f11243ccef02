//! Topology introspection and PlantUML export.
//!
//! The reachable graph is discovered by evaluating each visited state's
//! rule against every registered event. Rules are assumed pure, so this
//! never disturbs a running machine.

use crate::core::{EventId, StateDef, StateId, Target};
use crate::engine::Machine;
use crate::queue::LockStrategy;
use std::fmt;
use std::io;
use tracing::warn;

/// One discovered edge of the transition graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
    pub from: StateId,
    pub event: EventId,
    pub target: Target,
}

/// Every edge reachable from the machine's initial state, depth-first.
///
/// Within a state, edges follow event registration order. An edge is
/// reported each time it is discovered, but each state's own edges are
/// expanded only once, so cyclic topologies terminate. The walk keeps its
/// own stack of `(state, next event index)` frames, so chain length is
/// bounded by memory rather than thread stack.
pub fn edges<L: LockStrategy>(machine: &Machine<'_, L>) -> Vec<Edge> {
    let states = machine.states();
    let events = machine.events();
    let mut visited = vec![false; states.len()];
    let mut found = Vec::new();

    let Some(initial) = states.get(machine.initial_state()) else {
        return found;
    };
    visited[initial.id().index()] = true;
    let mut stack: Vec<(&StateDef, usize)> = vec![(initial, 0)];

    'frames: while let Some((state, resume)) = stack.pop() {
        for (position, event) in events.iter().enumerate().skip(resume) {
            let Some(target) = state.transition().evaluate(event) else {
                continue;
            };
            let next = match target {
                Target::Terminate => None,
                Target::State(id) => match states.get(id) {
                    Some(next) => Some(next),
                    None => {
                        warn!(
                            state = state.name(),
                            event = event.name,
                            target = %id,
                            "skipping edge to a state outside the table"
                        );
                        continue;
                    }
                },
            };
            found.push(Edge {
                from: state.id(),
                event: event.id,
                target,
            });

            if let Some(next) = next {
                let index = next.id().index();
                if !visited[index] {
                    visited[index] = true;
                    stack.push((state, position + 1));
                    stack.push((next, 0));
                    continue 'frames;
                }
            }
        }
    }
    found
}

/// Render the reachable graph as a PlantUML state diagram.
pub fn render_plantuml<L, W>(machine: &Machine<'_, L>, out: &mut W) -> fmt::Result
where
    L: LockStrategy,
    W: fmt::Write,
{
    let states = machine.states();
    let events = machine.events();
    let state_name = |id: StateId| states.get(id).map_or("?", StateDef::name);

    writeln!(out, "@startuml")?;
    writeln!(out, "    title `{}` Finite State Machine", machine.name())?;
    writeln!(out, "    [*] --> {}", state_name(machine.initial_state()))?;

    for edge in edges(machine) {
        let from = states.get(edge.from);
        let guard = from.map_or("?", |s| s.transition().name());
        let event = events.get(edge.event).map_or("?", |e| e.name);
        let to = match edge.target {
            Target::State(id) => state_name(id),
            Target::Terminate => "[*]",
        };
        writeln!(
            out,
            "    {} --> {} : {}[{}]",
            state_name(edge.from),
            to,
            event,
            guard
        )?;
    }

    writeln!(out, "@enduml")
}

/// Write the PlantUML diagram to a byte sink such as a file.
pub fn write_plantuml<L, W>(machine: &Machine<'_, L>, out: &mut W) -> io::Result<()>
where
    L: LockStrategy,
    W: io::Write,
{
    out.write_all(plantuml(machine).as_bytes())
}

/// The PlantUML diagram as a string.
pub fn plantuml<L: LockStrategy>(machine: &Machine<'_, L>) -> String {
    let mut text = String::new();
    if render_plantuml(machine, &mut text).is_err() {
        // Only a failing Display impl can get here; every name is a &str.
        warn!(machine = machine.name(), "diagram rendering was cut short");
    }
    text
}

impl<L: LockStrategy> Machine<'_, L> {
    /// PlantUML state diagram of the topology reachable from the initial
    /// state.
    pub fn diagram(&self) -> String {
        plantuml(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Event, EventList, StateTable, Transition};
    use crate::engine::EngineState;

    fn events() -> EventList {
        EventList::new(vec![
            Event::new(0, "E0"),
            Event::new(1, "E1"),
            Event::new(2, "E2"),
        ])
        .unwrap()
    }

    fn cycle() -> StateTable {
        StateTable::new(vec![
            StateDef::new(
                StateId(0),
                "A",
                Transition::from_table("GA", [(EventId(0), Target::State(StateId(1)))]),
            ),
            StateDef::new(
                StateId(1),
                "B",
                Transition::from_table(
                    "GB",
                    [
                        (EventId(0), Target::State(StateId(0))),
                        (EventId(1), Target::State(StateId(1))),
                        (EventId(2), Target::Terminate),
                    ],
                ),
            ),
            StateDef::new(StateId(2), "Unreachable", Transition::ignore_all("GU")),
        ])
        .unwrap()
    }

    #[test]
    fn edges_follow_depth_first_order() {
        let (states, events) = (cycle(), events());
        let machine = Machine::init("cyc", &states, None, &events).unwrap();

        let found = edges(&machine);
        assert_eq!(
            found,
            vec![
                Edge { from: StateId(0), event: EventId(0), target: Target::State(StateId(1)) },
                Edge { from: StateId(1), event: EventId(0), target: Target::State(StateId(0)) },
                Edge { from: StateId(1), event: EventId(1), target: Target::State(StateId(1)) },
                Edge { from: StateId(1), event: EventId(2), target: Target::Terminate },
            ]
        );
    }

    #[test]
    fn plantuml_output_matches_layout() {
        let (states, events) = (cycle(), events());
        let machine = Machine::init("cyc", &states, None, &events).unwrap();

        let expected = "\
@startuml
    title `cyc` Finite State Machine
    [*] --> A
    A --> B : E0[GA]
    B --> A : E0[GB]
    B --> B : E1[GB]
    B --> [*] : E2[GB]
@enduml
";
        assert_eq!(machine.diagram(), expected);
    }

    #[test]
    fn export_does_not_touch_machine_state() {
        let (states, events) = (cycle(), events());
        let machine = Machine::init("cyc", &states, None, &events).unwrap();

        let first = machine.diagram();
        let second = machine.diagram();
        assert_eq!(first, second);
        assert_eq!(machine.state(), EngineState::Initial);
    }

    #[test]
    fn write_plantuml_to_byte_sink() {
        let (states, events) = (cycle(), events());
        let machine = Machine::init("cyc", &states, Some(StateId(2)), &events).unwrap();

        let mut sink = Vec::new();
        write_plantuml(&machine, &mut sink).unwrap();
        let text = String::from_utf8(sink).unwrap();
        assert_eq!(
            text,
            "@startuml\n    title `cyc` Finite State Machine\n    [*] --> Unreachable\n@enduml\n"
        );
    }

    #[test]
    fn long_chain_is_walked_without_recursion() {
        let n = 10_000;
        let chain = (0..n)
            .map(|i| {
                let target = if i + 1 < n {
                    Target::State(StateId(i + 1))
                } else {
                    Target::Terminate
                };
                StateDef::new(
                    StateId(i),
                    "S",
                    Transition::from_table("G", [(EventId(0), target)]),
                )
            })
            .collect();
        let states = StateTable::new(chain).unwrap();
        let events = events();
        let machine = Machine::init("chain", &states, None, &events).unwrap();

        let found = edges(&machine);
        assert_eq!(found.len(), n);
        assert_eq!(found[0].target, Target::State(StateId(1)));
        assert_eq!(
            found[n - 1],
            Edge { from: StateId(n - 1), event: EventId(0), target: Target::Terminate }
        );
        assert_eq!(machine.diagram().lines().count(), n + 4);
    }
}
