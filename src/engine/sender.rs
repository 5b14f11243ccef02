//! Producer handle for a machine's event queue.

use super::machine::QueueStorage;
use crate::core::{Event, EventId};
use crate::queue::{EventQueue, LockStrategy, QueueError};
use std::fmt;
use std::sync::Arc;

/// Submits events to a machine's queue without borrowing the machine.
///
/// The handle is `Send` only when the queue uses a real lock such as
/// [`MutexLock`](crate::queue::MutexLock).
pub struct EventSender<L: LockStrategy> {
    queue: Arc<EventQueue<QueueStorage, L>>,
}

impl<L: LockStrategy> EventSender<L> {
    pub(crate) fn new(queue: Arc<EventQueue<QueueStorage, L>>) -> Self {
        Self { queue }
    }

    /// Queue a registered event. Fails immediately when the queue is full.
    pub fn send(&self, event: &Event) -> Result<EventId, QueueError> {
        self.send_id(event.id)
    }

    /// Queue a raw event id. Unregistered ids are dropped by the engine.
    pub fn send_id(&self, id: EventId) -> Result<EventId, QueueError> {
        self.queue.put(id).map(|()| id)
    }

    /// Whether the next send would fail with [`QueueError::Full`].
    pub fn is_full(&self) -> bool {
        self.queue.is_full()
    }

    /// Events queued and not yet drained.
    pub fn pending(&self) -> usize {
        self.queue.len()
    }
}

impl<L: LockStrategy> Clone for EventSender<L> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
        }
    }
}

impl<L: LockStrategy> fmt::Debug for EventSender<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventSender")
            .field("queue", &self.queue)
            .finish()
    }
}
