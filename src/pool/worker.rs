//! Worker thread implementation

use crate::core::{BoxedTask, PoolError, Result};
use crate::queue::SharedQueue;
use log::{debug, error, warn};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of tasks completed successfully
    pub tasks_processed: AtomicU64,
    /// Total number of tasks that returned an error
    pub tasks_failed: AtomicU64,
    /// Total number of tasks that panicked
    pub tasks_panicked: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment tasks processed counter
    pub fn increment_processed(&self) {
        self.tasks_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment tasks failed counter
    pub fn increment_failed(&self) {
        self.tasks_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Increment tasks panicked counter
    pub fn increment_panicked(&self) {
        self.tasks_panicked.fetch_add(1, Ordering::Relaxed);
    }

    /// Get total tasks processed
    pub fn get_tasks_processed(&self) -> u64 {
        self.tasks_processed.load(Ordering::Relaxed)
    }

    /// Get total tasks failed
    pub fn get_tasks_failed(&self) -> u64 {
        self.tasks_failed.load(Ordering::Relaxed)
    }

    /// Get total tasks panicked
    pub fn get_tasks_panicked(&self) -> u64 {
        self.tasks_panicked.load(Ordering::Relaxed)
    }
}

/// A worker thread that processes tasks from the shared queue
///
/// # Shutdown Behavior
///
/// Workers exit when the queue is stopping and empty, ensuring all queued
/// tasks are processed before shutdown completes.
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Create and start a new worker on the given queue
    ///
    /// # Arguments
    ///
    /// * `id` - Unique identifier for this worker
    /// * `name` - OS thread name
    /// * `queue` - The shared task queue to drain
    pub fn new(id: usize, name: String, queue: Arc<SharedQueue>) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(name)
            .spawn(move || {
                Self::run(id, queue, stats_clone);
            })
            .map_err(|e| PoolError::spawn_with_source(id, "failed to spawn worker", e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread
    pub fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PoolError::join(self.id, "worker panicked"))?;
        }
        Ok(())
    }

    /// Main worker loop
    ///
    /// Blocks on the queue's condition while idle, executes one task at a
    /// time outside the lock, and exits when the queue is stopping and empty.
    fn run(id: usize, queue: Arc<SharedQueue>, stats: Arc<WorkerStats>) {
        debug!("worker {} started", id);

        while let Some(mut task) = queue.pop_or_wait() {
            Self::execute_task(id, &mut task, &stats);
        }

        debug!(
            "worker {} shutting down ({} processed, {} failed, {} panicked)",
            id,
            stats.get_tasks_processed(),
            stats.get_tasks_failed(),
            stats.get_tasks_panicked()
        );
    }

    /// Execute a single task with panic protection
    ///
    /// A task failure or panic never escapes the loop; the worker stays
    /// alive for subsequent tasks.
    fn execute_task(id: usize, task: &mut BoxedTask, stats: &WorkerStats) {
        let task_type = task.task_type().to_string();
        let panic_result = catch_unwind(AssertUnwindSafe(|| task.execute()));

        match panic_result {
            Ok(Ok(())) => {
                stats.increment_processed();
            }
            Ok(Err(e)) => {
                let err = PoolError::task_failed(task_type, e.to_string());
                warn!("worker {}: {}", id, err);
                stats.increment_failed();
            }
            Err(payload) => {
                let err = PoolError::task_panicked(payload);
                error!("worker {}: {}", id, err);
                stats.increment_panicked();
            }
        }
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Normal teardown goes through join(); this is a last resort for a
        // worker dropped while its thread may still be running. Waiting is
        // bounded so a queue that was never closed cannot hang the drop.
        if let Some(thread) = self.thread.take() {
            const JOIN_TIMEOUT: Duration = Duration::from_secs(5);

            let start = std::time::Instant::now();
            loop {
                if thread.is_finished() {
                    if let Err(payload) = thread.join() {
                        let err = PoolError::task_panicked(payload);
                        error!("worker {} panicked during drop: {}", self.id, err);
                    }
                    break;
                }

                if start.elapsed() >= JOIN_TIMEOUT {
                    error!(
                        "worker {} did not finish within {}s during drop, thread may be leaked",
                        self.id,
                        JOIN_TIMEOUT.as_secs()
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}
