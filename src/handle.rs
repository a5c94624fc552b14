//! The result channel and the [`JoinHandle`] submitters use to collect it.
//!
//! This is a one-shot, single-producer/single-consumer rendezvous: a worker
//! writes an [`Outcome`] into it exactly once, a submitter reads it exactly
//! once. It is built from the same `Mutex` + `Condvar` monitor idiom as the
//! task queue rather than a channel, since there is exactly one value ever
//! in flight and no FIFO ordering to maintain. `sender_alive` lives inside
//! the same mutex as the outcome so that a sender dropped without calling
//! `send` (cancellation) can never race a submitter that is about to start
//! waiting -- both paths touch the same lock before the condvar is ever
//! involved.

use std::any::Any;
use std::sync::{Arc, Condvar, Mutex};

use crate::error::PoolError;

pub(crate) enum Outcome<R> {
    Value(R),
    Panic(Box<dyn Any + Send + 'static>),
}

struct Inner<R> {
    outcome: Option<Outcome<R>>,
    sender_alive: bool,
}

struct Shared<R> {
    inner: Mutex<Inner<R>>,
    condvar: Condvar,
}

/// The producer side of a task's result channel, held by the envelope that
/// runs on a worker thread.
pub(crate) struct ResultSender<R> {
    shared: Arc<Shared<R>>,
}

/// The submitter-side token granting the right to await a task's outcome.
///
/// Move-only: awaiting consumes `self`, so a handle can be joined at most
/// once, matching the single-fulfilment guarantee of the underlying channel.
pub struct JoinHandle<R> {
    shared: Arc<Shared<R>>,
}

pub(crate) fn channel<R>() -> (ResultSender<R>, JoinHandle<R>) {
    let shared = Arc::new(Shared {
        inner: Mutex::new(Inner {
            outcome: None,
            sender_alive: true,
        }),
        condvar: Condvar::new(),
    });
    (
        ResultSender {
            shared: Arc::clone(&shared),
        },
        JoinHandle { shared },
    )
}

impl<R> ResultSender<R> {
    /// Fulfils the channel with `outcome`. The sender is consumed here, and
    /// its `Drop` impl (which flips `sender_alive` and notifies) still runs
    /// immediately afterwards -- fulfilment and "sender is gone" are not
    /// distinct signals a waiter needs to special-case.
    pub(crate) fn send(self, outcome: Outcome<R>) {
        let mut guard = self.shared.inner.lock().expect("result channel poisoned");
        guard.outcome = Some(outcome);
    }
}

impl<R> Drop for ResultSender<R> {
    fn drop(&mut self) {
        let mut guard = self.shared.inner.lock().expect("result channel poisoned");
        guard.sender_alive = false;
        drop(guard);
        self.shared.condvar.notify_one();
    }
}

impl<R> JoinHandle<R> {
    /// Blocks until the task's outcome is available, then consumes it.
    ///
    /// Returns `Ok(value)` on success, resumes the original panic (via
    /// [`std::panic::resume_unwind`]) if the task panicked, or returns
    /// [`PoolError::Cancelled`] if the producer side was dropped without
    /// ever sending an outcome.
    pub fn join(self) -> Result<R, PoolError> {
        let mut guard = self.shared.inner.lock().expect("result channel poisoned");
        loop {
            if let Some(outcome) = guard.outcome.take() {
                return match outcome {
                    Outcome::Value(value) => Ok(value),
                    Outcome::Panic(payload) => std::panic::resume_unwind(payload),
                };
            }
            if !guard.sender_alive {
                return Err(PoolError::Cancelled);
            }
            guard = self
                .shared
                .condvar
                .wait(guard)
                .expect("result channel poisoned");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_round_trips() {
        let (sender, handle) = channel::<i32>();
        sender.send(Outcome::Value(42));
        assert_eq!(handle.join().unwrap(), 42);
    }

    #[test]
    fn dropped_sender_yields_cancelled() {
        let (sender, handle) = channel::<i32>();
        drop(sender);
        assert!(matches!(handle.join(), Err(PoolError::Cancelled)));
    }

    #[test]
    fn panic_resumes_on_join() {
        let (sender, handle) = channel::<i32>();
        let payload: Box<dyn Any + Send> = Box::new("boom".to_string());
        sender.send(Outcome::Panic(payload));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| handle.join()));
        assert!(result.is_err());
    }

    #[test]
    fn blocked_join_wakes_on_late_send() {
        use std::thread;
        use std::time::Duration;

        let (sender, handle) = channel::<i32>();
        let writer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(50));
            sender.send(Outcome::Value(7));
        });

        assert_eq!(handle.join().unwrap(), 7);
        writer.join().unwrap();
    }
}
