//! Error types for the task pool

/// Result type for task pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

/// Errors that can occur in the task pool
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PoolError {
    /// Pool has begun shutting down and rejects new work
    #[error("Task pool is shutting down ({pending_tasks} tasks pending)")]
    ShuttingDown {
        /// Number of tasks still queued when the submission was rejected
        pending_tasks: usize,
    },

    /// Failed to spawn a worker thread with details
    #[error("Failed to spawn worker thread #{worker_id}: {message}")]
    Spawn {
        /// ID of the worker that failed to spawn
        worker_id: usize,
        /// Error message
        message: String,
        /// Source IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to join a worker thread
    #[error("Failed to join worker thread #{worker_id}: {message}")]
    Join {
        /// ID of the worker that failed to join
        worker_id: usize,
        /// Error message
        message: String,
    },

    /// Task execution returned an error
    #[error("Task execution failed ({task_type}): {message}")]
    TaskFailed {
        /// Type name of the failed task
        task_type: String,
        /// Error message
        message: String,
    },

    /// Task panicked during execution
    #[error("Task panicked: {message}")]
    TaskPanicked {
        /// Panic payload rendered as a message
        message: String,
    },

    /// The task backing a handle was dropped before it could deliver a result
    #[error("Task was dropped before delivering a result")]
    TaskLost,

    /// Invalid configuration with parameter
    #[error("Invalid configuration for '{parameter}': {message}")]
    InvalidConfig {
        /// Configuration parameter name
        parameter: String,
        /// Error message
        message: String,
    },

    /// General error
    #[error("{0}")]
    Other(String),
}

impl PoolError {
    /// Create a shutting down error
    pub fn shutting_down(pending_tasks: usize) -> Self {
        PoolError::ShuttingDown { pending_tasks }
    }

    /// Create a spawn error with source
    pub fn spawn_with_source(
        worker_id: usize,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        PoolError::Spawn {
            worker_id,
            message: message.into(),
            source,
        }
    }

    /// Create a join error
    pub fn join(worker_id: usize, message: impl Into<String>) -> Self {
        PoolError::Join {
            worker_id,
            message: message.into(),
        }
    }

    /// Create a task failure error
    pub fn task_failed(task_type: impl Into<String>, message: impl Into<String>) -> Self {
        PoolError::TaskFailed {
            task_type: task_type.into(),
            message: message.into(),
        }
    }

    /// Create a task panic error from a panic payload
    pub fn task_panicked(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        PoolError::TaskPanicked { message }
    }

    /// Create an invalid config error
    pub fn invalid_config(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        PoolError::InvalidConfig {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        PoolError::Other(msg.into())
    }
}
