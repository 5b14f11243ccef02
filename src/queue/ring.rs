//! Fixed-capacity ring buffer of event ids.

use super::error::QueueError;
use crate::core::EventId;

/// The bare FIFO algorithm over borrowed or owned storage.
///
/// Holds exactly `size` valid entries starting at `read_pos`, wrapping
/// modulo `capacity`. Never allocates.
#[derive(Debug)]
pub struct Ring<B> {
    buffer: B,
    capacity: usize,
    size: usize,
    read_pos: usize,
    write_pos: usize,
}

impl<B> Ring<B>
where
    B: AsRef<[EventId]> + AsMut<[EventId]>,
{
    /// Bind storage. Capacity is the storage length; the ring starts empty.
    pub fn wrap(buffer: B) -> Self {
        let capacity = buffer.as_ref().len();
        Self {
            buffer,
            capacity,
            size: 0,
            read_pos: 0,
            write_pos: 0,
        }
    }

    /// Write at `write_pos`. Fails with [`QueueError::Full`] when `size == capacity`.
    pub fn put(&mut self, value: EventId) -> Result<(), QueueError> {
        if self.is_full() {
            return Err(QueueError::Full);
        }
        self.buffer.as_mut()[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % self.capacity;
        self.size += 1;
        Ok(())
    }

    /// Read at `read_pos` and advance it. Fails with [`QueueError::Empty`] when `size == 0`.
    pub fn get(&mut self) -> Result<EventId, QueueError> {
        let value = self.peek()?;
        self.read_pos = (self.read_pos + 1) % self.capacity;
        self.size -= 1;
        Ok(value)
    }

    /// Read at `read_pos` without advancing. Fails with [`QueueError::Empty`].
    pub fn peek(&self) -> Result<EventId, QueueError> {
        if self.is_empty() {
            return Err(QueueError::Empty);
        }
        Ok(self.buffer.as_ref()[self.read_pos])
    }

    /// Drop every queued entry.
    pub fn clear(&mut self) {
        self.size = 0;
        self.read_pos = 0;
        self.write_pos = 0;
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn is_full(&self) -> bool {
        self.size == self.capacity
    }

    /// Number of valid entries.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Storage length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn read_pos(&self) -> usize {
        self.read_pos
    }

    pub fn write_pos(&self) -> usize {
        self.write_pos
    }

    /// Give the storage back.
    pub fn into_inner(self) -> B {
        self.buffer
    }
}
