//! Rate-limited error logging for sink worker threads
//!
//! Worker threads never hand I/O failures back to the caller. They log them
//! instead, at most once per interval, with a count of what was suppressed in
//! between so a failing disk does not flood the diagnostic stream.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::Mutex;

/// Default interval for rate-limited logging
pub const DEFAULT_LOG_INTERVAL: Duration = Duration::from_secs(10);

/// Rate-limited logger shared by the workers of one sink
///
/// Thread-safe: atomic counters plus a mutex for the last log time.
pub struct RateLimitedLogger {
    /// Sink whose workers report through this logger
    sink: String,

    /// Minimum interval between log messages
    min_interval: Duration,

    /// When the last line was emitted
    last_emitted: Mutex<Option<Instant>>,

    /// Errors since the last emitted log line
    error_count: AtomicU64,

    /// Errors ever recorded
    total_errors: AtomicU64,
}

impl RateLimitedLogger {
    /// Create a logger for `sink` emitting at most once per `min_interval`
    pub fn new(sink: impl Into<String>, min_interval: Duration) -> Self {
        Self {
            sink: sink.into(),
            min_interval,
            last_emitted: Mutex::new(None),
            error_count: AtomicU64::new(0),
            total_errors: AtomicU64::new(0),
        }
    }

    /// Record an error and log it if the interval has elapsed
    ///
    /// Returns true if the error was logged, false if it was suppressed.
    pub fn error(&self, worker: &str, message: &str, error: &dyn std::fmt::Display) -> bool {
        self.error_count.fetch_add(1, Ordering::Relaxed);
        let total = self.total_errors.fetch_add(1, Ordering::Relaxed) + 1;

        if !self.claim_slot() {
            return false;
        }

        let count = self.error_count.swap(0, Ordering::Relaxed);
        if count > 1 {
            tracing::error!(
                sink = %self.sink,
                worker = %worker,
                error = %error,
                suppressed_count = count - 1,
                total_errors = total,
                "{message} (rate-limited)"
            );
        } else {
            tracing::error!(
                sink = %self.sink,
                worker = %worker,
                error = %error,
                total_errors = total,
                "{message}"
            );
        }
        true
    }

    /// Take the emit slot if the interval since the last line has passed
    fn claim_slot(&self) -> bool {
        let mut last = self.last_emitted.lock();
        let now = Instant::now();
        if last.is_some_and(|at| now.duration_since(at) < self.min_interval) {
            return false;
        }
        *last = Some(now);
        true
    }

    /// Errors recorded since the last emitted log line
    pub fn pending_error_count(&self) -> u64 {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Errors ever recorded
    pub fn total_error_count(&self) -> u64 {
        self.total_errors.load(Ordering::Relaxed)
    }
}
