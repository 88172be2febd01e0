//! One-shot result handles for submitted tasks
//!
//! A [`TaskHandle`] is the consumer half of a single-value channel. The worker
//! that executes the task holds the producer half and delivers exactly one
//! outcome: the task's return value, or the error it failed or panicked with.
//!
//! Retrieval consumes the handle, so a result can be observed at most once.
//! Dropping a handle without reading it is legal and simply discards the
//! result.

use crate::core::error::{PoolError, Result};
use crossbeam_channel::{bounded, Receiver, Sender};

/// The producer half of a task's result slot.
///
/// Held by the queue entry and fulfilled by whichever worker executes it.
#[derive(Debug)]
pub(crate) struct TaskPromise<T> {
    sender: Sender<Result<T>>,
}

impl<T> TaskPromise<T> {
    /// Deliver the task's outcome to the handle.
    ///
    /// Returns quietly if the handle was dropped; nobody is waiting, and a
    /// discarded result is not an error.
    pub(crate) fn fulfill(self, outcome: Result<T>) {
        let _ = self.sender.send(outcome);
    }
}

/// A handle to the eventual result of a submitted task.
///
/// Returned by [`ThreadPool::submit()`](crate::pool::ThreadPool::submit).
/// The result is retrieved with [`join()`](Self::join), which blocks until
/// the task has run. `join` takes the handle by value, so reading a result
/// twice is rejected at compile time.
///
/// # Example
///
/// ```rust
/// use taskpool::prelude::*;
///
/// # fn main() -> Result<()> {
/// let pool = ThreadPool::with_threads(2)?;
/// let handle = pool.submit(|| 6 * 7)?;
/// assert_eq!(handle.join()?, 42);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TaskHandle<T> {
    receiver: Receiver<Result<T>>,
}

impl<T> TaskHandle<T> {
    /// Create a connected promise/handle pair.
    ///
    /// The channel holds exactly one value; the promise never blocks on
    /// delivery and the handle blocks until delivery.
    pub(crate) fn channel() -> (TaskPromise<T>, TaskHandle<T>) {
        let (sender, receiver) = bounded(1);
        (TaskPromise { sender }, TaskHandle { receiver })
    }

    /// Block until the task's outcome is available and return it.
    ///
    /// If the task returned a value, yields `Ok(value)`. If the task failed
    /// or panicked, the captured error is re-surfaced here instead.
    ///
    /// # Errors
    ///
    /// - [`PoolError::TaskPanicked`] if the task panicked while running
    /// - [`PoolError::TaskLost`] if the task was destroyed without ever
    ///   running, so no outcome will arrive
    pub fn join(self) -> Result<T> {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            Err(_) => Err(PoolError::TaskLost),
        }
    }

    /// Check whether the outcome has already been delivered.
    ///
    /// Advisory snapshot only: `false` does not mean [`join()`](Self::join)
    /// will block for long.
    pub fn is_ready(&self) -> bool {
        !self.receiver.is_empty()
    }
}
