//! Bulk - Sinks
//!
//! Output sinks that receive committed bulks from the batching pipeline.
//!
//! # Architecture
//!
//! The pipeline drives every sink synchronously through the [`Sink`] trait.
//! Sinks with side effects only enqueue in `post_bulk`; their own worker
//! threads do the printing or writing.
//!
//! ```text
//! [Session] --Bulk--> [Sink::post_bulk] --> [WorkQueue] --> [Worker(s)] --> [Destination]
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Purpose | Threads |
//! |------|---------|---------|
//! | `stats` | Line / bulk / command counters | none |
//! | `console` | One `bulk: ...` line per bulk on stdout | 1 (`log`) |
//! | `dual_file` | One file per bulk | 2 (`file1`, `file2`) |
//!
//! # Example
//!
//! ```no_run
//! use bulk_protocol::Bulk;
//! use bulk_sinks::{ConsoleConfig, ConsoleSink, Sink};
//!
//! let mut sink = ConsoleSink::new(ConsoleConfig::default()).unwrap();
//! sink.post_bulk(["1", "2", "3"].into_iter().collect::<Bulk>());
//!
//! for line in sink.report() {
//!     println!("{line}");
//! }
//! ```

// =============================================================================
// Sink implementations (each in its own submodule)
// =============================================================================

/// Stats sink - synchronous counters
pub mod stats;

/// Console sink - one worker printing bulks
pub mod console;

/// Dual-file sink - two workers writing one file per bulk
pub mod dual_file;

// =============================================================================
// Shared utilities
// =============================================================================

/// Work queue, worker pool and rate-limited logging for threaded sinks
pub mod util;

/// Common types shared by all sinks (trait, errors, metrics, reports)
mod common;

// =============================================================================
// Public re-exports
// =============================================================================

pub use common::{MetricsSnapshot, Result, Sink, SinkError, SinkMetrics, SinkReport};

pub use console::{ConsoleConfig, ConsoleSink};
pub use dual_file::{DualFileConfig, DualFileSink};
pub use stats::{StatsSink, StatsSnapshot};
