//! Error types for the pool executor.

use thiserror::Error;

/// Everything that can go wrong when configuring, submitting to, or
/// joining against a [`crate::Pool`].
#[derive(Debug, Error)]
pub enum PoolError {
    /// Raised synchronously from `Pool::new`/`PoolConfig::build` when the
    /// requested worker count is zero.
    #[error("invalid pool configuration: worker_count must be >= 1, got {worker_count}")]
    InvalidConfiguration {
        /// The rejected worker count.
        worker_count: usize,
    },

    /// Returned synchronously from `submit` once shutdown has been
    /// initiated; the queue refuses new work from this point on.
    #[error("pool is shutting down or shut down; submission rejected")]
    Rejected,

    /// Delivered from `JoinHandle::join` when a task's result channel was
    /// dropped without ever being fulfilled (the task never ran).
    #[error("task was cancelled before it ran")]
    Cancelled,
}
