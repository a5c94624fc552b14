//! A fixed-size worker-pool executor.
//!
//! [`Pool`] runs a configured number of OS threads that pull work from a
//! single FIFO queue. [`Pool::submit`] accepts any `FnOnce() -> R + Send +
//! 'static` and returns a [`JoinHandle<R>`] that yields the return value, or
//! transparently resumes the original panic if the callable panicked.
//! Dropping (or explicitly shutting down) the pool drains every
//! already-accepted task before any worker thread exits -- no task is lost,
//! no thread is leaked.
//!
//! ```
//! use thread_pool::Pool;
//!
//! let pool = Pool::new(4).unwrap();
//! let handle = pool.submit(|| 2 + 2).unwrap();
//! assert_eq!(handle.join().unwrap(), 4);
//! ```

mod config;
mod envelope;
mod error;
mod handle;
mod pool;
mod queue;
mod worker;

pub use config::PoolConfig;
pub use error::PoolError;
pub use handle::JoinHandle;
pub use pool::Pool;
