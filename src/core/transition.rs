//! Transition rules.
//!
//! Each state carries exactly one rule. Given an incoming event the rule
//! picks the next state, the terminal pseudo-state, or declines.

use super::event::{Event, EventId};
use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a matched transition leads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Target {
    /// A state in the same state table. May be the current state (self-loop).
    State(StateId),
    /// The terminal pseudo-state. The machine halts once it gets here.
    Terminate,
}

impl From<StateId> for Target {
    fn from(id: StateId) -> Self {
        Target::State(id)
    }
}

type GuardFn = Box<dyn Fn(&Event) -> Option<Target> + Send + Sync>;

/// Named decision function from an event to an optional [`Target`].
///
/// Rules are expected to be pure: the diagram export evaluates them against
/// every registered event without running the machine.
///
/// # Example
///
/// ```rust
/// use evqfsm::core::{Event, EventId, StateId, Target, Transition};
///
/// let rule = Transition::new("Idle", |event: &Event| match event.id {
///     EventId(0) => Some(Target::State(StateId(1))),
///     EventId(9) => Some(Target::Terminate),
///     _ => None,
/// });
///
/// assert_eq!(rule.evaluate(&Event::new(0, "Go")), Some(Target::State(StateId(1))));
/// assert_eq!(rule.evaluate(&Event::new(1, "Noise")), None);
/// ```
pub struct Transition {
    name: &'static str,
    guard: GuardFn,
}

impl Transition {
    /// Create a rule from a guard function.
    pub fn new<F>(name: &'static str, guard: F) -> Self
    where
        F: Fn(&Event) -> Option<Target> + Send + Sync + 'static,
    {
        Transition {
            name,
            guard: Box::new(guard),
        }
    }

    /// Create a rule from an `(event, target)` table.
    ///
    /// The first entry matching the event id wins; unlisted events are
    /// ignored.
    pub fn from_table<I>(name: &'static str, table: I) -> Self
    where
        I: IntoIterator<Item = (EventId, Target)>,
    {
        let table: Vec<(EventId, Target)> = table.into_iter().collect();
        Self::new(name, move |event: &Event| {
            table
                .iter()
                .find(|(id, _)| *id == event.id)
                .map(|(_, target)| *target)
        })
    }

    /// A rule that ignores every event.
    pub fn ignore_all(name: &'static str) -> Self {
        Self::new(name, |_| None)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Consult the rule for an event. `None` means the event is ignored.
    pub fn evaluate(&self, event: &Event) -> Option<Target> {
        (self.guard)(event)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closure_rule_discriminates_by_event() {
        let rule = Transition::new("Guard_1", |event: &Event| match event.id.0 {
            1 => Some(Target::State(StateId(1))),
            2 => Some(Target::State(StateId(2))),
            _ => None,
        });

        assert_eq!(rule.name(), "Guard_1");
        assert_eq!(
            rule.evaluate(&Event::new(1, "E1")),
            Some(Target::State(StateId(1)))
        );
        assert_eq!(
            rule.evaluate(&Event::new(2, "E2")),
            Some(Target::State(StateId(2)))
        );
        assert_eq!(rule.evaluate(&Event::new(0, "E0")), None);
    }

    #[test]
    fn table_rule_matches_first_entry() {
        let rule = Transition::from_table(
            "Guard_3",
            [
                (EventId(0), Target::State(StateId(0))),
                (EventId(2), Target::Terminate),
                (EventId(2), Target::State(StateId(1))),
            ],
        );

        assert_eq!(rule.evaluate(&Event::new(2, "E2")), Some(Target::Terminate));
        assert_eq!(
            rule.evaluate(&Event::new(0, "E0")),
            Some(Target::State(StateId(0)))
        );
        assert_eq!(rule.evaluate(&Event::new(3, "E3")), None);
    }

    #[test]
    fn rule_is_deterministic() {
        let rule = Transition::from_table("G", [(EventId(1), Target::Terminate)]);
        let event = Event::new(1, "E1");
        assert_eq!(rule.evaluate(&event), rule.evaluate(&event));
    }

    #[test]
    fn ignore_all_never_matches() {
        let rule = Transition::ignore_all("Sink");
        for id in -2..5 {
            assert_eq!(rule.evaluate(&Event::new(id, "any")), None);
        }
    }
}
