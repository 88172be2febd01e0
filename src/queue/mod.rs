//! The shared task queue and its synchronization.
//!
//! A single mutex guards the FIFO of pending tasks together with the stop
//! flag, and one condition variable wakes idle workers when either "queue
//! non-empty" or "pool stopping" becomes true. The single-lock design is
//! intentionally simple: critical sections are O(1) appends, pops, and flag
//! checks, and task execution always happens outside the lock.

mod shared;

pub use shared::SharedQueue;

/// Errors that can occur during queue operations.
#[derive(Debug, thiserror::Error)]
pub enum QueueError {
    /// Queue has been closed and accepts no new tasks
    #[error("queue is stopping ({pending} tasks pending)")]
    Stopping {
        /// Number of tasks still queued when the push was rejected
        pending: usize,
    },
}

/// Result type for queue operations.
pub type QueueResult<T> = std::result::Result<T, QueueError>;
