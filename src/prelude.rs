//! Convenient re-exports for common types and traits

pub use crate::core::{BoxedTask, ClosureTask, PoolError, Result, Task, TaskHandle};
pub use crate::pool::{ThreadPool, ThreadPoolConfig, WorkerStats};
