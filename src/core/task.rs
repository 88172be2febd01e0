//! Task trait and related types

use crate::core::error::{PoolError, Result};
use std::borrow::Cow;
use std::fmt;

/// A trait representing a unit of work to be executed by the pool
pub trait Task: Send {
    /// Execute the task
    ///
    /// # Errors
    ///
    /// Returns an error if the task execution fails
    fn execute(&mut self) -> Result<()>;

    /// Get the task's type name for debugging and statistics
    fn task_type(&self) -> &str {
        "Task"
    }
}

impl fmt::Debug for dyn Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({})", self.task_type())
    }
}

/// A boxed task that can be sent across threads
pub type BoxedTask = Box<dyn Task>;

/// Adapts a one-shot closure into a [`Task`]
///
/// The closure is consumed on first execution; running the same instance a
/// second time yields [`PoolError::TaskFailed`] instead of silently
/// succeeding.
pub struct ClosureTask<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    closure: Option<F>,
    label: Cow<'static, str>,
}

impl<F> ClosureTask<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    /// Create a new closure task
    pub fn new(closure: F) -> Self {
        Self::with_name(closure, "ClosureTask")
    }

    /// Create a new closure task with a custom name
    pub fn with_name(closure: F, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            closure: Some(closure),
            label: name.into(),
        }
    }
}

impl<F> Task for ClosureTask<F>
where
    F: FnOnce() -> Result<()> + Send,
{
    fn execute(&mut self) -> Result<()> {
        match self.closure.take() {
            Some(closure) => closure(),
            None => Err(PoolError::task_failed(
                self.label.as_ref(),
                "already executed - cannot execute twice",
            )),
        }
    }

    fn task_type(&self) -> &str {
        &self.label
    }
}
