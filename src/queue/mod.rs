//! Bounded event queue.
//!
//! A fixed-capacity FIFO of event ids between producers and the single
//! engine consumer. Backpressure is synchronous: [`EventQueue::put`] fails
//! with [`QueueError::Full`] and never blocks or retries.
//!
//! # Example
//!
//! ```rust
//! use evqfsm::core::EventId;
//! use evqfsm::queue::{EventQueue, NoLock, QueueError};
//!
//! let queue: EventQueue<[EventId; 2], NoLock> = EventQueue::wrap([EventId(0); 2]);
//! queue.put(EventId(1)).unwrap();
//! queue.put(EventId(2)).unwrap();
//! assert_eq!(queue.put(EventId(3)), Err(QueueError::Full));
//!
//! assert_eq!(queue.get(), Ok(EventId(1)));
//! assert_eq!(queue.get(), Ok(EventId(2)));
//! assert_eq!(queue.get(), Err(QueueError::Empty));
//! ```

mod error;
mod lock;
mod ring;

pub use error::QueueError;
pub use lock::{LockStrategy, MutexLock, NoLock};
pub use ring::Ring;

use crate::core::EventId;
use std::fmt;

/// A [`Ring`] behind a [`LockStrategy`].
///
/// Every operation takes `&self` and runs as one critical section, so a
/// queue with a real lock can be shared between a producer thread and the
/// consumer.
pub struct EventQueue<B, L: LockStrategy = NoLock> {
    capacity: usize,
    ring: L::Cell<Ring<B>>,
}

impl<B, L> EventQueue<B, L>
where
    B: AsRef<[EventId]> + AsMut<[EventId]>,
    L: LockStrategy,
{
    /// Bind storage and start empty. The storage length is the capacity.
    pub fn wrap(storage: B) -> Self {
        let ring = Ring::wrap(storage);
        Self {
            capacity: ring.capacity(),
            ring: L::new_cell(ring),
        }
    }

    /// Append an id. Fails with [`QueueError::Full`] when every slot is taken.
    pub fn put(&self, value: EventId) -> Result<(), QueueError> {
        self.locked(|ring| ring.put(value))
    }

    /// Remove the oldest id. Fails with [`QueueError::Empty`] when nothing is queued.
    pub fn get(&self) -> Result<EventId, QueueError> {
        self.locked(|ring| ring.get())
    }

    /// The oldest id without removing it. Fails with [`QueueError::Empty`].
    pub fn peek(&self) -> Result<EventId, QueueError> {
        self.locked(|ring| ring.peek())
    }

    /// Drop every queued id.
    pub fn clear(&self) {
        self.locked(|ring| ring.clear())
    }

    /// No ids queued; [`get`](Self::get) would fail.
    pub fn is_empty(&self) -> bool {
        self.locked(|ring| ring.is_empty())
    }

    /// Every slot taken; [`put`](Self::put) would fail.
    pub fn is_full(&self) -> bool {
        self.locked(|ring| ring.is_full())
    }

    /// Number of queued ids.
    pub fn len(&self) -> usize {
        self.locked(|ring| ring.len())
    }

    /// Maximum number of queued ids, fixed at [`wrap`](Self::wrap).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read position of the underlying ring.
    pub fn read_pos(&self) -> usize {
        self.locked(|ring| ring.read_pos())
    }

    /// Give the backing storage back, discarding the ring state.
    pub fn into_storage(self) -> B {
        L::into_inner::<Ring<B>>(self.ring).into_inner()
    }

    fn locked<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Ring<B>) -> R,
    {
        L::with::<Ring<B>, R, F>(&self.ring, f)
    }
}

impl<B, L> fmt::Debug for EventQueue<B, L>
where
    B: AsRef<[EventId]> + AsMut<[EventId]>,
    L: LockStrategy,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventQueue")
            .field("capacity", &self.capacity)
            .field("size", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn wrap_reports_empty_and_capacity() {
        let queue: EventQueue<Vec<EventId>> = EventQueue::wrap(vec![EventId(0); 8]);
        assert!(queue.is_empty());
        assert!(!queue.is_full());
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.capacity(), 8);
    }

    #[test]
    fn fifo_order_is_preserved() {
        let queue: EventQueue<[EventId; 4]> = EventQueue::wrap([EventId(0); 4]);
        for id in 0..4 {
            queue.put(EventId(id)).unwrap();
        }
        assert!(queue.is_full());
        assert_eq!(queue.put(EventId(99)), Err(QueueError::Full));

        for id in 0..4 {
            assert_eq!(queue.get(), Ok(EventId(id)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn get_frees_a_slot_for_put() {
        let queue: EventQueue<[EventId; 1]> = EventQueue::wrap([EventId(0); 1]);
        queue.put(EventId(1)).unwrap();
        assert_eq!(queue.put(EventId(2)), Err(QueueError::Full));
        queue.get().unwrap();
        assert_eq!(queue.put(EventId(2)), Ok(()));
    }

    #[test]
    fn peek_leaves_size_and_position_alone() {
        let queue: EventQueue<[EventId; 3]> = EventQueue::wrap([EventId(0); 3]);
        queue.put(EventId(4)).unwrap();
        queue.put(EventId(5)).unwrap();
        queue.get().unwrap();

        let (size, pos) = (queue.len(), queue.read_pos());
        assert_eq!(queue.peek(), Ok(EventId(5)));
        assert_eq!((queue.len(), queue.read_pos()), (size, pos));
    }

    #[test]
    fn into_storage_returns_buffer() {
        let queue: EventQueue<[EventId; 2]> = EventQueue::wrap([EventId(0); 2]);
        queue.put(EventId(7)).unwrap();
        let storage = queue.into_storage();
        assert_eq!(storage[0], EventId(7));
    }

    #[test]
    fn mutex_queue_accepts_producer_thread() {
        let queue: Arc<EventQueue<Vec<EventId>, MutexLock>> =
            Arc::new(EventQueue::wrap(vec![EventId(0); 16]));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                for id in 0..10 {
                    queue.put(EventId(id)).unwrap();
                }
            })
        };
        producer.join().unwrap();

        let drained: Vec<EventId> = std::iter::from_fn(|| queue.get().ok()).collect();
        assert_eq!(drained, (0..10).map(EventId).collect::<Vec<_>>());
    }
}
