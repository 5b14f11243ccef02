//! Queue error types.

use thiserror::Error;

/// Errors returned by event queue operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum QueueError {
    /// The queue holds `capacity` entries; the value was not recorded.
    #[error("Event queue is full")]
    Full,

    /// Nothing to read. The engine treats this as "drained".
    #[error("Event queue is empty")]
    Empty,
}
