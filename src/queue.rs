//! The task queue: a single-monitor FIFO of [`Envelope`]s.
//!
//! One `Mutex` guards both the backing `VecDeque` and the `closed` flag, and
//! one `Condvar` is used for both "something arrived" and "we're closing"
//! wakeups. Keeping `closed` inside the same lock as the deque (rather than
//! as a bare atomic) is what makes `close()` and `enqueue()` race-free: a
//! submitter either observes `closed == true` and is rejected, or its
//! envelope is already in the deque before `close()` could have run.

use std::collections::VecDeque;
use std::sync::{Condvar, Mutex};

use crate::envelope::Envelope;
use crate::error::PoolError;

struct State {
    tasks: VecDeque<Envelope>,
    closed: bool,
}

/// Thread-safe FIFO of task envelopes shared by every worker in a pool.
pub(crate) struct TaskQueue {
    state: Mutex<State>,
    condvar: Condvar,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        TaskQueue {
            state: Mutex::new(State {
                tasks: VecDeque::new(),
                closed: false,
            }),
            condvar: Condvar::new(),
        }
    }

    /// Appends `envelope` to the tail of the queue and wakes one waiting
    /// worker. Fails with [`PoolError::Rejected`] if the queue has already
    /// been closed.
    pub(crate) fn enqueue(&self, envelope: Envelope) -> Result<(), PoolError> {
        let mut state = self.state.lock().expect("task queue mutex poisoned");
        if state.closed {
            return Err(PoolError::Rejected);
        }
        state.tasks.push_back(envelope);
        drop(state);
        self.condvar.notify_one();
        Ok(())
    }

    /// Blocks until either an envelope is available or the queue is closed
    /// and empty. Returns `None` only in the latter case -- the drain
    /// sentinel that tells a worker to exit its loop.
    pub(crate) fn dequeue_or_wait(&self) -> Option<Envelope> {
        let mut state = self.state.lock().expect("task queue mutex poisoned");
        loop {
            if let Some(envelope) = state.tasks.pop_front() {
                return Some(envelope);
            }
            if state.closed {
                return None;
            }
            state = self
                .condvar
                .wait(state)
                .expect("task queue mutex poisoned");
        }
    }

    /// Marks the queue closed and wakes every waiting worker. Idempotent:
    /// calling it again is a no-op beyond re-notifying already-woken
    /// waiters.
    pub(crate) fn close(&self) {
        let mut state = self.state.lock().expect("task queue mutex poisoned");
        state.closed = true;
        drop(state);
        self.condvar.notify_all();
    }
}
