//! Thread pool and worker implementations

pub mod thread_pool;
pub mod worker;

pub use thread_pool::{ThreadPool, ThreadPoolConfig, DEFAULT_NUM_THREADS};
pub use worker::{Worker, WorkerStats};
