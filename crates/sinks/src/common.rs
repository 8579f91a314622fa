//! Common types and utilities for sinks
//!
//! Shared functionality across all sink types: the `Sink` trait the pipeline
//! drives, per-worker metrics, report lines and errors.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use bulk_protocol::Bulk;
use thiserror::Error;

/// A subscriber that receives committed bulks
///
/// The pipeline calls `observe_line` for every reassembled line and
/// `post_bulk` for every bulk its batch policy commits. Empty bulks may be
/// posted (a policy flush with nothing pending); every sink drops them.
///
/// `shutdown` must be idempotent. `report` shuts the sink down first so the
/// counters it returns are final.
pub trait Sink: Send {
    /// Sink name used in logs
    fn name(&self) -> &str;

    /// Observe one input line before the batch policy sees it
    fn observe_line(&mut self, _line: &str) {}

    /// Receive a committed bulk
    fn post_bulk(&mut self, bulk: Bulk);

    /// Stop accepting work, drain queued bulks and join worker threads
    fn shutdown(&mut self);

    /// Shut down and return one report line per sink thread
    fn report(&mut self) -> Vec<SinkReport>;
}

/// Metrics kept by each sink thread
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Bulks processed
    pub bulks: AtomicU64,

    /// Commands processed (sum of bulk lengths)
    pub commands: AtomicU64,

    /// Bulks that failed to be written
    pub write_errors: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            bulks: AtomicU64::new(0),
            commands: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Record a processed bulk
    #[inline]
    pub fn record_bulk(&self, command_count: u64) {
        self.bulks.fetch_add(1, Ordering::Relaxed);
        self.commands.fetch_add(command_count, Ordering::Relaxed);
    }

    /// Record a write error
    #[inline]
    pub fn write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bulks: self.bulks.load(Ordering::Relaxed),
            commands: self.commands.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub bulks: u64,
    pub commands: u64,
    pub write_errors: u64,
}

/// One report line for a sink thread
///
/// Renders as `<name> thread — <bulks> bulk(s), <commands> commands`, or with
/// the line count first when the sink tracks input lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkReport {
    /// Thread name (`main`, `log`, `file1`, ...)
    pub name: String,

    /// Input lines observed, for sinks that count them
    pub lines: Option<u64>,

    /// Bulks processed
    pub bulks: u64,

    /// Commands processed
    pub commands: u64,
}

impl SinkReport {
    /// Build a report line from a metrics snapshot
    pub fn from_snapshot(name: impl Into<String>, snapshot: MetricsSnapshot) -> Self {
        Self {
            name: name.into(),
            lines: None,
            bulks: snapshot.bulks,
            commands: snapshot.commands,
        }
    }
}

impl fmt::Display for SinkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.lines {
            Some(lines) => write!(
                f,
                "{} thread — {} lines, {} commands, {} bulk(s)",
                self.name, lines, self.commands, self.bulks
            ),
            None => write!(
                f,
                "{} thread — {} bulk(s), {} commands",
                self.name, self.bulks, self.commands
            ),
        }
    }
}

/// Common sink errors
#[derive(Debug, Error)]
pub enum SinkError {
    /// Worker thread could not be started
    #[error("failed to spawn worker '{worker}': {source}")]
    Spawn {
        worker: String,
        #[source]
        source: io::Error,
    },

    /// Output directory could not be created
    #[error("failed to create directory '{path}': {source}")]
    CreateDir {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Output file could not be created
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Output file could not be written
    #[error("failed to write file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: io::Error,
    },

    /// Every probed file name was already taken
    #[error("no free file name for worker {worker} at {timestamp} after {attempts} attempts")]
    NameExhausted {
        worker: String,
        timestamp: i64,
        attempts: u32,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl SinkError {
    /// Create a spawn error
    pub fn spawn(worker: impl Into<String>, source: io::Error) -> Self {
        Self::Spawn {
            worker: worker.into(),
            source,
        }
    }
}

/// Result type for sink operations
pub type Result<T> = std::result::Result<T, SinkError>;

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
