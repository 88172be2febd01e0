//! Thread pool implementation

use crate::core::{ClosureTask, PoolError, Result, Task, TaskHandle, TaskPromise};
use crate::pool::worker::{Worker, WorkerStats};
use crate::queue::{QueueError, SharedQueue};
use log::debug;
use parking_lot::Mutex;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default number of worker threads when none is specified.
pub const DEFAULT_NUM_THREADS: usize = 2;

/// Configuration for the thread pool
#[derive(Clone, Debug)]
pub struct ThreadPoolConfig {
    /// Number of worker threads
    pub num_threads: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl Default for ThreadPoolConfig {
    fn default() -> Self {
        Self {
            num_threads: DEFAULT_NUM_THREADS,
            thread_name_prefix: "worker".to_string(),
        }
    }
}

impl ThreadPoolConfig {
    /// Create a new configuration with the specified number of threads
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Default::default()
        }
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    ///
    /// A zero-thread pool would never execute anything and would deadlock
    /// any caller blocked on a result handle, so it is rejected outright.
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(PoolError::invalid_config(
                "num_threads",
                "Number of threads must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// A task wrapper that delivers its closure's outcome into a result handle
///
/// The closure runs under `catch_unwind`, so a value, an error, or a caught
/// panic all end up in the handle; nothing escapes into the worker loop.
struct PromiseTask<F, T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    closure: Option<F>,
    promise: Option<TaskPromise<T>>,
}

impl<F, T> PromiseTask<F, T>
where
    F: FnOnce() -> T + Send,
    T: Send,
{
    fn new(closure: F, promise: TaskPromise<T>) -> Self {
        Self {
            closure: Some(closure),
            promise: Some(promise),
        }
    }
}

impl<F, T> Task for PromiseTask<F, T>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    fn execute(&mut self) -> Result<()> {
        let (closure, promise) = match (self.closure.take(), self.promise.take()) {
            (Some(closure), Some(promise)) => (closure, promise),
            _ => {
                return Err(PoolError::other(
                    "PromiseTask already executed - cannot execute twice",
                ))
            }
        };

        let outcome = catch_unwind(AssertUnwindSafe(closure)).map_err(PoolError::task_panicked);
        promise.fulfill(outcome);
        // The outcome, failure included, was delivered to the handle; from
        // the worker's point of view this task completed.
        Ok(())
    }

    fn task_type(&self) -> &str {
        "PromiseTask"
    }
}

/// A fixed-size pool of worker threads executing submitted tasks
///
/// Workers are spawned eagerly at construction and stay alive, idle-blocked
/// on the shared queue, until work arrives or shutdown begins.
///
/// # Shutdown Mechanism
///
/// [`shutdown()`](Self::shutdown) closes the queue and joins every worker.
/// Workers keep draining queued tasks after the close, so every task
/// submitted before shutdown still runs; only new submissions are rejected.
/// Dropping the pool performs the same shutdown.
pub struct ThreadPool {
    config: ThreadPoolConfig,
    queue: Arc<SharedQueue>,
    workers: Mutex<Vec<Worker>>,
    // Kept separately from the workers so the counters remain readable
    // after shutdown has joined and dropped the Worker handles
    stats: Vec<Arc<WorkerStats>>,
    total_tasks_submitted: AtomicU64,
}

impl std::fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadPool")
            .field("config", &self.config)
            .field("queue", &self.queue)
            .field(
                "total_tasks_submitted",
                &self.total_tasks_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl ThreadPool {
    /// Create a thread pool with the default number of workers
    pub fn new() -> Result<Self> {
        Self::with_config(ThreadPoolConfig::default())
    }

    /// Create a thread pool with the specified number of workers
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::with_config(ThreadPoolConfig::new(num_threads))
    }

    /// Create a thread pool with custom configuration
    ///
    /// Workers are spawned immediately; there is no separate start step.
    ///
    /// # Errors
    ///
    /// - [`PoolError::InvalidConfig`] if the configuration is invalid
    /// - [`PoolError::Spawn`] if a worker thread could not be created
    pub fn with_config(config: ThreadPoolConfig) -> Result<Self> {
        config.validate()?;

        let queue = Arc::new(SharedQueue::new());
        let mut workers = Vec::with_capacity(config.num_threads);
        for id in 0..config.num_threads {
            let name = format!("{}-{}", config.thread_name_prefix, id);
            match Worker::new(id, name, Arc::clone(&queue)) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    // Let the workers spawned so far observe the stop flag
                    // and exit before they are dropped
                    queue.close();
                    return Err(e);
                }
            }
        }

        let stats = workers.iter().map(|w| w.stats()).collect();

        Ok(Self {
            config,
            queue,
            workers: Mutex::new(workers),
            stats,
            total_tasks_submitted: AtomicU64::new(0),
        })
    }

    /// Submit a closure and get a handle to its eventual result
    ///
    /// The closure is bound into a type-erased queue entry together with a
    /// fresh one-shot result slot, appended to the queue, and one idle worker
    /// is woken. Returns immediately; block on
    /// [`TaskHandle::join()`] for the value.
    ///
    /// A panic inside the closure is caught and surfaced through the handle
    /// as [`PoolError::TaskPanicked`]; the worker survives and keeps
    /// processing.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::ShuttingDown`] if shutdown has begun. The handle
    /// is not created in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskpool::prelude::*;
    ///
    /// # fn main() -> Result<()> {
    /// let pool = ThreadPool::with_threads(4)?;
    ///
    /// let handle = pool.submit(|| 2 + 2)?;
    /// assert_eq!(handle.join()?, 4);
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit<F, T>(&self, f: F) -> Result<TaskHandle<T>>
    where
        F: FnOnce() -> T + Send + 'static,
        T: Send + 'static,
    {
        let (promise, handle) = TaskHandle::channel();
        self.push_task(Box::new(PromiseTask::new(f, promise)))?;
        Ok(handle)
    }

    /// Submit a custom [`Task`] implementation, fire-and-forget
    ///
    /// No result handle is created; failures and panics are logged and
    /// counted in the worker's [`WorkerStats`].
    pub fn submit_task<J: Task + 'static>(&self, task: J) -> Result<()> {
        self.push_task(Box::new(task))
    }

    /// Submit a fallible closure, fire-and-forget
    pub fn execute<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce() -> Result<()> + Send + 'static,
    {
        self.submit_task(ClosureTask::new(f))
    }

    fn push_task(&self, task: crate::core::BoxedTask) -> Result<()> {
        self.queue.push(task).map_err(|e| match e {
            QueueError::Stopping { pending } => PoolError::shutting_down(pending),
        })?;
        self.total_tasks_submitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Get the number of worker threads
    pub fn num_threads(&self) -> usize {
        self.config.num_threads
    }

    /// Whether shutdown has begun
    ///
    /// Momentary snapshot, advisory only; not a basis for external
    /// synchronization decisions.
    pub fn is_stopping(&self) -> bool {
        self.queue.is_stopping()
    }

    /// Whether the task queue is currently empty
    ///
    /// Momentary snapshot, advisory only.
    pub fn queue_is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of tasks currently queued
    ///
    /// Momentary snapshot, advisory only.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Get total number of tasks submitted
    pub fn total_tasks_submitted(&self) -> u64 {
        self.total_tasks_submitted.load(Ordering::Relaxed)
    }

    /// Get statistics for all workers
    ///
    /// The counters stay readable after [`shutdown()`](Self::shutdown), so
    /// final totals can be inspected once the backlog has drained.
    pub fn get_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.stats.clone()
    }

    /// Get total tasks processed across all workers
    pub fn total_tasks_processed(&self) -> u64 {
        self.stats.iter().map(|s| s.get_tasks_processed()).sum()
    }

    /// Get total tasks failed across all workers
    pub fn total_tasks_failed(&self) -> u64 {
        self.stats.iter().map(|s| s.get_tasks_failed()).sum()
    }

    /// Get total tasks panicked across all workers
    pub fn total_tasks_panicked(&self) -> u64 {
        self.stats.iter().map(|s| s.get_tasks_panicked()).sum()
    }

    /// Shut down the pool and wait for all workers to finish
    ///
    /// 1. Closes the queue: new submissions are rejected from this point
    /// 2. Wakes every blocked worker
    /// 3. Joins all workers once they have drained the remaining backlog
    ///
    /// Synchronous: does not return until every previously queued task has
    /// run and every worker has exited. Idempotent; later calls return `Ok`
    /// without doing anything. Concurrent callers all block until the
    /// workers have exited, whichever caller performs the join.
    pub fn shutdown(&self) -> Result<()> {
        // The lock is held across the joins; a concurrent caller blocks here
        // and only returns once the joining caller is done.
        let mut workers = self.workers.lock();
        if workers.is_empty() {
            return Ok(());
        }

        debug!(
            "shutting down pool '{}' ({} tasks queued)",
            self.config.thread_name_prefix,
            self.queue.len()
        );

        self.queue.close();
        for worker in std::mem::take(&mut *workers) {
            worker.join()?;
        }

        Ok(())
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!(
                "failed to shut down pool '{}' during drop: {}",
                self.config.thread_name_prefix,
                e
            );
        }
    }
}
