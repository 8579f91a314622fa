//! Stats sink - synchronous counters, no threads
//!
//! Counts every input line it observes plus the bulks and commands it is
//! posted. Runs inline on the caller thread; there is nothing to join at
//! shutdown.

use bulk_protocol::Bulk;

use crate::common::{Sink, SinkReport};

/// Default thread name used in the report line
pub const STATS_THREAD_NAME: &str = "main";

/// Counters kept by the stats sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub lines: u64,
    pub bulks: u64,
    pub commands: u64,
}

/// Stats sink that only counts
#[derive(Debug)]
pub struct StatsSink {
    name: String,
    stats: StatsSnapshot,
    shut_down: bool,
}

impl StatsSink {
    /// Create a stats sink reporting as the `main` thread
    pub fn new() -> Self {
        Self::with_name(STATS_THREAD_NAME)
    }

    /// Create a stats sink with a custom report name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stats: StatsSnapshot::default(),
            shut_down: false,
        }
    }

    /// Current counters
    #[inline]
    pub fn snapshot(&self) -> StatsSnapshot {
        self.stats
    }
}

impl Default for StatsSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for StatsSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn observe_line(&mut self, _line: &str) {
        self.stats.lines += 1;
    }

    fn post_bulk(&mut self, bulk: Bulk) {
        if bulk.is_empty() {
            return;
        }
        self.stats.bulks += 1;
        self.stats.commands += bulk.len() as u64;
    }

    fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        tracing::info!(
            sink = %self.name,
            lines = self.stats.lines,
            bulks = self.stats.bulks,
            commands = self.stats.commands,
            "stats sink shutting down"
        );
    }

    fn report(&mut self) -> Vec<SinkReport> {
        self.shutdown();
        vec![SinkReport {
            name: self.name.clone(),
            lines: Some(self.stats.lines),
            bulks: self.stats.bulks,
            commands: self.stats.commands,
        }]
    }
}
