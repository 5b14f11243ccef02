//! Locking strategies for the event queue.
//!
//! The ring algorithm is lock-agnostic. A strategy decides what cell the
//! ring lives in and how a critical section around it is entered.

use parking_lot::Mutex;
use std::cell::RefCell;

/// Injectable mutual exclusion around queue operations.
///
/// The closure passed to [`LockStrategy::with`] is the whole critical
/// section; it never runs user code.
pub trait LockStrategy {
    /// Container holding the protected value.
    type Cell<T>;

    fn new_cell<T>(value: T) -> Self::Cell<T>;

    fn with<T, R, F>(cell: &Self::Cell<T>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;

    fn into_inner<T>(cell: Self::Cell<T>) -> T;
}

/// No synchronization. Producer and consumer share one execution context.
///
/// The cell is not `Sync`, so a queue using it cannot be shared across
/// threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLock;

impl LockStrategy for NoLock {
    type Cell<T> = RefCell<T>;

    fn new_cell<T>(value: T) -> RefCell<T> {
        RefCell::new(value)
    }

    fn with<T, R, F>(cell: &RefCell<T>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut cell.borrow_mut())
    }

    fn into_inner<T>(cell: RefCell<T>) -> T {
        cell.into_inner()
    }
}

/// A `parking_lot` mutex around every queue operation, for a producer
/// running on another thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct MutexLock;

impl LockStrategy for MutexLock {
    type Cell<T> = Mutex<T>;

    fn new_cell<T>(value: T) -> Mutex<T> {
        Mutex::new(value)
    }

    fn with<T, R, F>(cell: &Mutex<T>, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut cell.lock())
    }

    fn into_inner<T>(cell: Mutex<T>) -> T {
        cell.into_inner()
    }
}
