//! A single worker thread that drains the shared [`TaskQueue`].

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::queue::TaskQueue;

/// A long-running thread of execution owned by a [`crate::Pool`].
///
/// Exits only once the shared queue reports closed-and-empty; never exits
/// because of a panicking task.
pub(crate) struct Worker {
    pub(crate) id: usize,
    thread: Option<JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn(
        id: usize,
        queue: Arc<TaskQueue>,
        active_workers: Arc<AtomicUsize>,
        name_prefix: Option<&str>,
        stack_size: Option<usize>,
    ) -> std::io::Result<Worker> {
        let mut builder = thread::Builder::new();
        if let Some(prefix) = name_prefix {
            builder = builder.name(format!("{prefix}-{id}"));
        }
        if let Some(size) = stack_size {
            builder = builder.stack_size(size);
        }

        let thread = builder.spawn(move || run_loop(id, &queue, &active_workers))?;

        Ok(Worker {
            id,
            thread: Some(thread),
        })
    }

    /// Blocks until this worker's thread has exited. Safe to call at most
    /// once; the pool controller only ever joins each worker a single time
    /// during shutdown.
    pub(crate) fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                warn!(worker_id = self.id, "worker thread panicked during join");
            }
        }
    }
}

fn run_loop(id: usize, queue: &TaskQueue, active_workers: &AtomicUsize) {
    debug!(worker_id = id, "worker starting");
    loop {
        let Some(envelope) = queue.dequeue_or_wait() else {
            break;
        };

        active_workers.fetch_add(1, Ordering::SeqCst);
        // Envelopes already catch any panic from the user's callable
        // (see `pool::submit`) and route it into the task's result
        // channel. This outer `catch_unwind` is a backstop: it ensures
        // that even a malformed envelope can never take the worker
        // thread down with it.
        if std::panic::catch_unwind(std::panic::AssertUnwindSafe(envelope)).is_err() {
            warn!(worker_id = id, "envelope invocation panicked outside its own containment");
        }
        active_workers.fetch_sub(1, Ordering::SeqCst);
    }
    debug!(worker_id = id, "worker draining: queue closed and empty");
}
