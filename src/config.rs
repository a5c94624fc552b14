//! Pool configuration: validated worker count plus optional thread-naming
//! and stack-size knobs, following the builder style this lineage already
//! uses for its other external-process wrappers.

use std::num::NonZeroUsize;

use crate::error::PoolError;
use crate::pool::Pool;

/// Builder for a [`Pool`]. `worker_count` is a [`NonZeroUsize`] so the
/// "at least one worker" invariant is enforced by the type itself; the
/// convenience constructor [`Pool::new`] re-checks it at runtime for callers
/// passing a plain `usize`.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    worker_count: NonZeroUsize,
    thread_name_prefix: Option<String>,
    stack_size: Option<usize>,
}

impl PoolConfig {
    /// Starts a configuration for a pool with `worker_count` workers.
    pub fn new(worker_count: NonZeroUsize) -> PoolConfig {
        PoolConfig {
            worker_count,
            thread_name_prefix: None,
            stack_size: None,
        }
    }

    /// Names worker threads `"{prefix}-{id}"` instead of leaving them
    /// anonymous. Useful in panic messages and OS-level thread listings.
    pub fn thread_name_prefix(mut self, prefix: impl Into<String>) -> PoolConfig {
        self.thread_name_prefix = Some(prefix.into());
        self
    }

    /// Overrides the default OS stack size for every worker thread.
    pub fn stack_size(mut self, bytes: usize) -> PoolConfig {
        self.stack_size = Some(bytes);
        self
    }

    pub(crate) fn worker_count(&self) -> usize {
        self.worker_count.get()
    }

    pub(crate) fn thread_name_prefix_ref(&self) -> Option<&str> {
        self.thread_name_prefix.as_deref()
    }

    pub(crate) fn stack_size_value(&self) -> Option<usize> {
        self.stack_size
    }

    /// Validates and constructs the pool, spawning every worker thread.
    ///
    /// If any worker fails to spawn, every worker started so far is joined
    /// (after closing the queue) before the original I/O error is
    /// propagated -- no thread is ever left dangling on a failed
    /// construction.
    pub fn build(self) -> Result<Pool, PoolError> {
        Pool::from_config(self)
    }
}
