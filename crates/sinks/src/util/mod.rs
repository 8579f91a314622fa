//! Sink utilities for threaded sinks
//!
//! - **work_queue**: Unbounded FIFO guarded by one mutex/condvar pair
//! - **worker_pool**: Named worker threads draining a shared queue
//! - **rate_limited_logger**: Error logging that does not flood on failing I/O

pub mod rate_limited_logger;
pub mod work_queue;
pub mod worker_pool;

pub use rate_limited_logger::{DEFAULT_LOG_INTERVAL, RateLimitedLogger};
pub use work_queue::WorkQueue;
pub use worker_pool::WorkerPool;
