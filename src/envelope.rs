//! The task envelope: a type-erased, move-only, nullary invocable.
//!
//! An envelope is constructed by the submission adapter ([`crate::pool`]) so
//! that it already closes over the user's callable *and* the producer side
//! of the task's result channel. By the time an envelope reaches the queue
//! it is just `FnOnce() + Send + 'static` -- the queue and the workers never
//! need to know what `R` the original callable returned.

/// A type-erased unit of work. Invoking it runs the user's callable and
/// forwards the outcome into that task's result channel; it never panics
/// out of its own body (panics from the user callable are caught inside).
pub type Envelope = Box<dyn FnOnce() + Send + 'static>;
