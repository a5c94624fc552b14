//! The pool controller: owns the queue and the worker set, exposes
//! submission, and guarantees idempotent, leak-free shutdown.

use std::num::NonZeroUsize;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{info, instrument};

use crate::config::PoolConfig;
use crate::error::PoolError;
use crate::handle::{self, JoinHandle, Outcome};
use crate::queue::TaskQueue;
use crate::worker::Worker;

/// A fixed-size pool of OS worker threads.
///
/// Construct with [`Pool::new`] (a plain worker count) or
/// [`PoolConfig::build`] (thread naming / stack size). Submit work with
/// [`Pool::submit`]; every returned [`JoinHandle`] is fulfilled exactly
/// once, whether the pool is shut down explicitly or via `Drop`.
pub struct Pool {
    queue: Arc<TaskQueue>,
    workers: Mutex<Vec<Worker>>,
    worker_count: usize,
    active_workers: Arc<AtomicUsize>,
    shutdown_initiated: AtomicBool,
}

impl Pool {
    /// Convenience constructor taking a plain worker count. Returns
    /// [`PoolError::InvalidConfiguration`] for `worker_count == 0` instead
    /// of requiring callers to build a [`NonZeroUsize`] themselves.
    pub fn new(worker_count: usize) -> Result<Pool, PoolError> {
        let worker_count = NonZeroUsize::new(worker_count)
            .ok_or(PoolError::InvalidConfiguration { worker_count: 0 })?;
        PoolConfig::new(worker_count).build()
    }

    pub(crate) fn from_config(config: PoolConfig) -> Result<Pool, PoolError> {
        let worker_count = config.worker_count();
        let queue = Arc::new(TaskQueue::new());
        let active_workers = Arc::new(AtomicUsize::new(0));
        let name_prefix = config.thread_name_prefix_ref();
        let stack_size = config.stack_size_value();

        let mut workers = Vec::with_capacity(worker_count);
        for id in 0..worker_count {
            match Worker::spawn(
                id,
                Arc::clone(&queue),
                Arc::clone(&active_workers),
                name_prefix,
                stack_size,
            ) {
                Ok(worker) => workers.push(worker),
                Err(spawn_err) => {
                    // Leave no dangling threads: close the queue so any
                    // already-spawned worker can exit, then join them,
                    // before giving up. Thread-spawn failure (OS resource
                    // exhaustion) is not one of this crate's modeled error
                    // kinds -- it is treated as the fatal, unrecoverable
                    // condition it actually is.
                    queue.close();
                    for worker in &mut workers {
                        worker.join();
                    }
                    panic!("failed to spawn worker thread {id}: {spawn_err}");
                }
            }
        }

        info!(worker_count, "pool constructed");
        Ok(Pool {
            queue,
            workers: Mutex::new(workers),
            worker_count,
            active_workers,
            shutdown_initiated: AtomicBool::new(false),
        })
    }

    /// Packages `f` into a task envelope, enqueues it, and returns a handle
    /// for its eventual outcome. Fails with [`PoolError::Rejected`] if
    /// shutdown has already been initiated -- nothing is enqueued in that
    /// case.
    pub fn submit<F, R>(&self, f: F) -> Result<JoinHandle<R>, PoolError>
    where
        F: FnOnce() -> R + Send + 'static,
        R: Send + 'static,
    {
        let (sender, receiver) = handle::channel::<R>();
        let envelope = Box::new(move || {
            let outcome = match std::panic::catch_unwind(AssertUnwindSafe(f)) {
                Ok(value) => Outcome::Value(value),
                Err(payload) => Outcome::Panic(payload),
            };
            sender.send(outcome);
        });

        self.queue.enqueue(envelope)?;
        Ok(receiver)
    }

    /// The fixed number of worker threads this pool was constructed with.
    pub fn worker_count(&self) -> usize {
        self.worker_count
    }

    /// The number of workers currently executing a task. Observational
    /// only -- never used to decide correctness of submission or shutdown.
    pub fn active_workers(&self) -> usize {
        self.active_workers.load(Ordering::SeqCst)
    }

    /// Whether [`Pool::shutdown`] has been called (or is in the process of
    /// running) at least once.
    pub fn is_shutting_down(&self) -> bool {
        self.shutdown_initiated.load(Ordering::SeqCst)
    }

    /// Closes the queue (refusing further submissions) and joins every
    /// worker, in construction order. Idempotent and safe to call from
    /// multiple threads: concurrent callers serialize on the internal
    /// workers lock, so every call only returns once the drain is actually
    /// complete, not merely once some other caller has started it.
    #[instrument(skip(self))]
    pub fn shutdown(&self) {
        self.shutdown_initiated.store(true, Ordering::SeqCst);
        self.queue.close();
        let mut workers = self.workers.lock().expect("workers mutex poisoned");
        for worker in workers.iter_mut() {
            worker.join();
        }
    }
}

impl Drop for Pool {
    fn drop(&mut self) {
        self.shutdown();
    }
}
