//! Core types and traits for the task pool

pub mod error;
pub mod handle;
pub mod task;

pub use error::{PoolError, Result};
pub use handle::TaskHandle;
pub use task::{BoxedTask, ClosureTask, Task};

pub(crate) use handle::TaskPromise;
