//! Session - one connect / receive... / disconnect lifecycle
//!
//! A session reassembles raw byte chunks into lines and feeds every complete
//! line to each subscription in order, synchronously on the caller thread.
//!
//! ```text
//! bytes --> [partial buffer] --line--> [Subscription 1: policy --> Stats]
//!                                  \-> [Subscription 2: policy --> Console]
//!                                  \-> [Subscription 3: policy --> Dual-File]
//! ```
//!
//! Lines are cut on `\n` over raw bytes and only then decoded (lossily) as
//! UTF-8, so a character split across two chunks is reassembled intact.

use std::fmt;

use bulk_protocol::LINE_TERMINATOR;
use bulk_sinks::{
    ConsoleConfig, ConsoleSink, DualFileConfig, DualFileSink, Sink, SinkReport, StatsSink,
};

use crate::error::{PipelineError, Result};
use crate::subscription::Subscription;

/// Opaque session handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl SessionId {
    /// Create a session ID from a raw value
    #[inline]
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Raw value of this handle
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "session:{}", self.0)
    }
}

/// Options for opening a session with the default sinks
#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Maximum bulk size in sized mode (must be positive)
    pub bulk_size: usize,

    /// Console sink configuration
    pub console: ConsoleConfig,

    /// Dual-file sink configuration
    pub file: DualFileConfig,
}

impl SessionOptions {
    /// Default sink configuration with the given bulk size
    pub fn new(bulk_size: usize) -> Self {
        Self {
            bulk_size,
            console: ConsoleConfig::default(),
            file: DualFileConfig::default(),
        }
    }

    /// Set the console sink configuration
    #[must_use]
    pub fn with_console(mut self, console: ConsoleConfig) -> Self {
        self.console = console;
        self
    }

    /// Set the dual-file sink configuration
    #[must_use]
    pub fn with_file(mut self, file: DualFileConfig) -> Self {
        self.file = file;
        self
    }
}

/// A live session
pub struct Session {
    id: SessionId,
    partial: Vec<u8>,
    subscriptions: Vec<Subscription>,
    lines: u64,
}

impl Session {
    /// Open a session with the default sinks: stats, console, dual-file
    pub fn open(id: SessionId, options: SessionOptions) -> Result<Self> {
        if options.bulk_size == 0 {
            return Err(PipelineError::InvalidBulkSize);
        }

        let sinks: Vec<Box<dyn Sink>> = vec![
            Box::new(StatsSink::new()),
            Box::new(ConsoleSink::new(options.console)?),
            Box::new(DualFileSink::new(options.file)?),
        ];
        Self::with_sinks(id, options.bulk_size, sinks)
    }

    /// Open a session subscribing the given sinks, in order
    ///
    /// The sink set is fixed for the lifetime of the session.
    pub fn with_sinks(id: SessionId, bulk_size: usize, sinks: Vec<Box<dyn Sink>>) -> Result<Self> {
        if bulk_size == 0 {
            return Err(PipelineError::InvalidBulkSize);
        }

        let subscriptions: Vec<_> = sinks
            .into_iter()
            .map(|sink| Subscription::new(sink, bulk_size))
            .collect();

        tracing::info!(
            session = %id,
            bulk_size,
            sinks = ?subscriptions.iter().map(Subscription::name).collect::<Vec<_>>(),
            "session opened"
        );

        Ok(Self {
            id,
            partial: Vec::new(),
            subscriptions,
            lines: 0,
        })
    }

    /// Session handle
    #[inline]
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Subscriptions in notification order
    #[inline]
    pub fn subscriptions(&self) -> &[Subscription] {
        &self.subscriptions
    }

    /// Bytes buffered after the last complete line
    #[inline]
    pub fn partial_len(&self) -> usize {
        self.partial.len()
    }

    /// Lines dispatched so far
    #[inline]
    pub fn lines(&self) -> u64 {
        self.lines
    }

    /// Append a chunk and dispatch every complete line it finishes
    pub fn receive(&mut self, data: &[u8]) {
        let scan_from = self.partial.len();
        self.partial.extend_from_slice(data);

        let Some(first) = find_terminator(&self.partial[scan_from..]) else {
            return;
        };

        let buffer = std::mem::take(&mut self.partial);
        let mut start = 0;
        let mut end = scan_from + first;
        loop {
            let line = String::from_utf8_lossy(&buffer[start..end]);
            self.notify(&line);
            start = end + 1;
            match find_terminator(&buffer[start..]) {
                Some(pos) => end = start + pos,
                None => break,
            }
        }
        self.partial = buffer[start..].to_vec();
    }

    /// Flush the partial line and every pending bulk, then shut all sinks down
    ///
    /// Consumes the session: the handle is no longer usable afterwards.
    pub fn finish(mut self) -> SessionReport {
        if !self.partial.is_empty() {
            let buffer = std::mem::take(&mut self.partial);
            let line = String::from_utf8_lossy(&buffer);
            self.notify(&line);
        }

        for subscription in &mut self.subscriptions {
            subscription.flush();
        }

        let sinks: Vec<SinkReport> = self
            .subscriptions
            .iter_mut()
            .flat_map(Subscription::report)
            .collect();

        tracing::info!(session = %self.id, lines = self.lines, "session closed");

        SessionReport { id: self.id, sinks }
    }

    /// Feed one line to every subscription in order
    fn notify(&mut self, line: &str) {
        self.lines += 1;
        for subscription in &mut self.subscriptions {
            subscription.update(line);
        }
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("partial_len", &self.partial.len())
            .field("subscriptions", &self.subscriptions)
            .field("lines", &self.lines)
            .finish()
    }
}

#[inline]
fn find_terminator(bytes: &[u8]) -> Option<usize> {
    bytes.iter().position(|&b| b == LINE_TERMINATOR)
}

/// Final report of a closed session, one row per sink thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Handle of the closed session
    pub id: SessionId,

    /// Report rows in subscription order
    pub sinks: Vec<SinkReport>,
}

impl SessionReport {
    /// Find a report row by thread name
    pub fn get(&self, name: &str) -> Option<&SinkReport> {
        self.sinks.iter().find(|r| r.name == name)
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.sinks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;
