//! Shared FIFO task queue guarded by a mutex and condition variable.

use super::{QueueError, QueueResult};
use crate::core::BoxedTask;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// Queue contents and the stop flag, guarded together.
///
/// Keeping `stopping` under the same mutex as the deque means a worker can
/// never observe "empty" and "not stopping" from two different instants,
/// which would open a lost-wakeup window between the checks.
struct Inner {
    tasks: VecDeque<BoxedTask>,
    stopping: bool,
}

/// A mutex-protected FIFO of pending tasks shared between submitters and
/// workers.
///
/// Idle workers block on the condition variable instead of spinning. The
/// wake condition is "queue non-empty or pool stopping"; the predicate is
/// re-checked on every wake because condition variables may wake spuriously.
///
/// # Shutdown
///
/// [`close()`](Self::close) flips the stop flag and wakes every waiter.
/// Workers keep draining queued tasks after close; [`pop_or_wait()`]
/// (Self::pop_or_wait) only signals exit once the queue is stopping AND
/// empty, so every task queued before shutdown still runs.
pub struct SharedQueue {
    inner: Mutex<Inner>,
    available: Condvar,
}

impl SharedQueue {
    /// Create an empty, open queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                tasks: VecDeque::new(),
                stopping: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Append a task to the back of the queue and wake one waiting worker.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Stopping`] if [`close()`](Self::close) was
    /// already called; no new work is accepted once shutdown begins.
    pub fn push(&self, task: BoxedTask) -> QueueResult<()> {
        {
            let mut inner = self.inner.lock();
            if inner.stopping {
                return Err(QueueError::Stopping {
                    pending: inner.tasks.len(),
                });
            }
            inner.tasks.push_back(task);
        }
        self.available.notify_one();
        Ok(())
    }

    /// Take the oldest queued task, blocking while the queue is empty and
    /// still open.
    ///
    /// Returns `None` when the queue is stopping and fully drained, which is
    /// the worker's signal to exit. The lock is released before this returns,
    /// so callers always execute the task outside the critical section.
    pub fn pop_or_wait(&self) -> Option<BoxedTask> {
        let mut inner = self.inner.lock();
        while inner.tasks.is_empty() && !inner.stopping {
            self.available.wait(&mut inner);
        }
        if inner.stopping && inner.tasks.is_empty() {
            return None;
        }
        inner.tasks.pop_front()
    }

    /// Mark the queue as stopping and wake every blocked worker.
    ///
    /// Idempotent. Tasks already queued remain retrievable via
    /// [`pop_or_wait()`](Self::pop_or_wait) until drained.
    pub fn close(&self) {
        {
            let mut inner = self.inner.lock();
            inner.stopping = true;
        }
        self.available.notify_all();
    }

    /// Whether [`close()`](Self::close) has been called.
    ///
    /// Momentary snapshot, advisory only.
    pub fn is_stopping(&self) -> bool {
        self.inner.lock().stopping
    }

    /// Number of tasks currently queued.
    ///
    /// Momentary snapshot, advisory only.
    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Whether the queue is currently empty.
    ///
    /// Momentary snapshot, advisory only.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }
}

impl Default for SharedQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SharedQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("SharedQueue")
            .field("len", &inner.tasks.len())
            .field("stopping", &inner.stopping)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ClosureTask;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    fn test_task(name: &'static str) -> BoxedTask {
        Box::new(ClosureTask::with_name(|| Ok(()), name))
    }

    #[test]
    fn test_push_pop_fifo() {
        let queue = SharedQueue::new();
        queue.push(test_task("first")).unwrap();
        queue.push(test_task("second")).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_or_wait().unwrap().task_type(), "first");
        assert_eq!(queue.pop_or_wait().unwrap().task_type(), "second");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_push_after_close_rejected() {
        let queue = SharedQueue::new();
        queue.push(test_task("queued")).unwrap();
        queue.close();

        match queue.push(test_task("late")) {
            Err(QueueError::Stopping { pending }) => assert_eq!(pending, 1),
            other => panic!("expected Stopping error, got {:?}", other),
        }
    }

    #[test]
    fn test_drain_after_close() {
        let queue = SharedQueue::new();
        queue.push(test_task("a")).unwrap();
        queue.push(test_task("b")).unwrap();
        queue.close();

        // Queued tasks survive close and come out in order
        assert_eq!(queue.pop_or_wait().unwrap().task_type(), "a");
        assert_eq!(queue.pop_or_wait().unwrap().task_type(), "b");
        // Stopping and empty: exit signal
        assert!(queue.pop_or_wait().is_none());
    }

    #[test]
    fn test_pop_blocks_until_push() {
        let queue = Arc::new(SharedQueue::new());

        let q = Arc::clone(&queue);
        let waiter = thread::spawn(move || q.pop_or_wait().map(|t| t.task_type().to_string()));

        // Give the waiter a chance to block
        thread::sleep(Duration::from_millis(20));
        queue.push(test_task("woken")).unwrap();

        assert_eq!(waiter.join().unwrap().as_deref(), Some("woken"));
    }

    #[test]
    fn test_close_wakes_all_waiters() {
        let queue = Arc::new(SharedQueue::new());

        let waiters: Vec<_> = (0..4)
            .map(|_| {
                let q = Arc::clone(&queue);
                thread::spawn(move || q.pop_or_wait().is_none())
            })
            .collect();

        thread::sleep(Duration::from_millis(20));
        queue.close();

        for waiter in waiters {
            assert!(waiter.join().unwrap());
        }
    }

    #[test]
    fn test_close_is_idempotent() {
        let queue = SharedQueue::new();
        queue.close();
        queue.close();
        assert!(queue.is_stopping());
        assert!(queue.pop_or_wait().is_none());
    }

    #[test]
    fn test_snapshots_stable_without_activity() {
        let queue = SharedQueue::new();
        for _ in 0..10 {
            assert!(!queue.is_stopping());
            assert!(queue.is_empty());
            assert_eq!(queue.len(), 0);
        }
    }
}
