//! # taskpool
//!
//! A fixed-size worker thread pool that executes arbitrary submitted closures
//! and hands back blocking result handles.
//!
//! ## Features
//!
//! - **Fixed pool**: worker count set at construction, threads spawned
//!   eagerly and reused for every task
//! - **Result handles**: [`submit()`](pool::ThreadPool::submit) returns a
//!   [`TaskHandle`] whose value is retrieved with a blocking
//!   [`join()`](core::handle::TaskHandle::join)
//! - **FIFO queue**: one mutex-protected queue, workers idle-block on a
//!   condition variable instead of spinning
//! - **Graceful shutdown**: teardown drains every queued task before the
//!   workers exit, and new submissions are rejected with an error
//! - **Panic isolation**: a task that fails or panics reports through its own
//!   handle; the worker thread survives
//!
//! ## Quick Start
//!
//! ```rust
//! use taskpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let pool = ThreadPool::with_threads(4)?;
//!
//! // Submit closures and collect handles
//! let handles: Vec<_> = (0..4)
//!     .map(|i| pool.submit(move || i * 10))
//!     .collect::<Result<_>>()?;
//!
//! // Block on each handle for its task's own result
//! for (i, handle) in handles.into_iter().enumerate() {
//!     assert_eq!(handle.join()?, i * 10);
//! }
//!
//! // Drains remaining work, then joins the workers
//! pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Fire-and-Forget Tasks
//!
//! ```rust
//! use taskpool::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let pool = ThreadPool::new()?;
//!
//! pool.execute(|| {
//!     println!("no handle needed");
//!     Ok(())
//! })?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Custom Tasks
//!
//! ```rust
//! use taskpool::prelude::*;
//!
//! struct MyTask {
//!     data: String,
//! }
//!
//! impl Task for MyTask {
//!     fn execute(&mut self) -> Result<()> {
//!         println!("processing: {}", self.data);
//!         Ok(())
//!     }
//!
//!     fn task_type(&self) -> &str {
//!         "MyTask"
//!     }
//! }
//!
//! # fn main() -> Result<()> {
//! let pool = ThreadPool::with_threads(2)?;
//! pool.submit_task(MyTask {
//!     data: "test".to_string(),
//! })?;
//! # pool.shutdown()?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod core;
pub mod pool;
pub mod prelude;
pub mod queue;

pub use crate::core::{BoxedTask, ClosureTask, PoolError, Result, Task, TaskHandle};
pub use pool::{ThreadPool, ThreadPoolConfig, WorkerStats};
