//! Events and the registered event list.
//!
//! An event is identified by its id; the name is diagnostic only. Ids are
//! dense, so the id of an event is also its index in the [`EventList`].

use crate::builder::BuildError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an event as it travels through the event queue.
///
/// Queued ids are raw integers: a producer may enqueue an id that was never
/// registered, and the engine filters it out when it is dequeued.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(pub i32);

impl EventId {
    /// Build an id from a position in the event list.
    pub const fn from_index(index: usize) -> Self {
        EventId(index as i32)
    }

    /// Position of this id in an event list, if it is non-negative.
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for EventId {
    fn from(id: i32) -> Self {
        EventId(id)
    }
}

/// A registered event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: EventId,
    pub name: &'static str,
}

impl Event {
    pub fn new(id: impl Into<EventId>, name: &'static str) -> Self {
        Self {
            id: id.into(),
            name,
        }
    }
}

/// Ordered, immutable registry of the events a machine understands.
#[derive(Clone, Debug, Default, Serialize)]
pub struct EventList {
    events: Vec<Event>,
}

impl EventList {
    /// Create an event list, checking that the entry at index `i` has id `i`.
    pub fn new(events: Vec<Event>) -> Result<Self, BuildError> {
        for (index, event) in events.iter().enumerate() {
            if event.id.index() != Some(index) {
                return Err(BuildError::EventIdMismatch {
                    index,
                    id: event.id,
                });
            }
        }
        Ok(Self { events })
    }

    /// Look up a registered event. Returns `None` for ids outside
    /// `[0, len)`.
    pub fn get(&self, id: EventId) -> Option<&Event> {
        id.index().and_then(|index| self.events.get(index))
    }

    pub fn contains(&self, id: EventId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> EventList {
        EventList::new(vec![
            Event::new(0, "Start"),
            Event::new(1, "Stop"),
            Event::new(2, "Reset"),
        ])
        .unwrap()
    }

    #[test]
    fn lookup_returns_registered_events() {
        let events = sample();
        assert_eq!(events.len(), 3);
        assert_eq!(events.get(EventId(1)).map(|e| e.name), Some("Stop"));
    }

    #[test]
    fn lookup_rejects_out_of_range_ids() {
        let events = sample();
        assert!(events.get(EventId(3)).is_none());
        assert!(events.get(EventId(-1)).is_none());
        assert!(!events.contains(EventId(i32::MAX)));
    }

    #[test]
    fn sparse_ids_are_rejected() {
        let result = EventList::new(vec![Event::new(0, "A"), Event::new(2, "B")]);
        assert!(matches!(
            result,
            Err(BuildError::EventIdMismatch { index: 1, id: EventId(2) })
        ));
    }

    #[test]
    fn event_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&EventId(7)).unwrap();
        assert_eq!(json, "7");
        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EventId(7));
    }
}
