//! Console sink - one worker thread printing each bulk as one line
//!
//! # Example Output
//!
//! ```text
//! bulk: 1, 2, 3, 4, 5
//! bulk: 6
//! bulk: a, b, c, d
//! ```
//!
//! `post_bulk` only pushes onto the queue; formatting and the write happen on
//! the `log` worker thread.

use std::io::{self, Write};
use std::sync::Arc;

use bulk_protocol::Bulk;
use owo_colors::{OwoColorize, Style};
use parking_lot::Mutex;

use crate::common::{Result, Sink, SinkReport};
use crate::util::WorkerPool;

/// Worker thread name used in the report line
pub const CONSOLE_THREAD_NAME: &str = "log";

/// Configuration for console sink
#[derive(Debug, Clone, Default)]
pub struct ConsoleConfig {
    /// Dim the `bulk:` label with ANSI styling
    pub color: bool,
}

impl ConsoleConfig {
    /// Create config with colors enabled
    pub fn with_color() -> Self {
        Self { color: true }
    }
}

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

/// Console sink printing bulks to stdout (or any writer)
pub struct ConsoleSink {
    name: String,
    pool: WorkerPool,
}

impl ConsoleSink {
    /// Create a console sink writing to stdout
    pub fn new(config: ConsoleConfig) -> Result<Self> {
        Self::with_writer(config, io::stdout())
    }

    /// Create a console sink writing to a custom writer
    pub fn with_writer<W>(config: ConsoleConfig, writer: W) -> Result<Self>
    where
        W: Write + Send + 'static,
    {
        let name = String::from("console");
        let label = if config.color {
            Style::new().dimmed()
        } else {
            Style::new()
        };
        let writer: SharedWriter = Arc::new(Mutex::new(Box::new(writer)));

        let pool = WorkerPool::spawn(&name, &[CONSOLE_THREAD_NAME], move |_, bulk| {
            let line = format_bulk(bulk, config.color.then_some(label));
            let mut out = writer.lock();
            writeln!(out, "{line}")?;
            out.flush()?;
            Ok(())
        })?;

        tracing::info!(sink = %name, "console sink starting");
        Ok(Self { name, pool })
    }
}

impl Sink for ConsoleSink {
    fn name(&self) -> &str {
        &self.name
    }

    fn post_bulk(&mut self, bulk: Bulk) {
        if bulk.is_empty() {
            return;
        }
        if let Err(bulk) = self.pool.submit(bulk) {
            tracing::warn!(sink = %self.name, commands = bulk.len(), "bulk posted after shutdown, dropped");
        }
    }

    fn shutdown(&mut self) {
        if self.pool.is_shut_down() {
            return;
        }
        self.pool.shutdown();

        for report in self.pool.reports() {
            tracing::info!(
                sink = %self.name,
                worker = %report.name,
                bulks = report.bulks,
                commands = report.commands,
                "console sink shutting down"
            );
        }
    }

    fn report(&mut self) -> Vec<SinkReport> {
        self.shutdown();
        self.pool.reports()
    }
}

/// Format a bulk as `bulk: cmd1, cmd2, ..., cmdN`
fn format_bulk(bulk: &Bulk, label: Option<Style>) -> String {
    match label {
        Some(style) => format!("{} {}", "bulk:".style(style), bulk.join(", ")),
        None => bulk.to_string(),
    }
}

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;
