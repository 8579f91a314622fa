//! Bulk - An ordered batch of commands
//!
//! The `Bulk` struct is the unit delivered to every sink. A `BulkBuilder`
//! holds the pending commands while a batch policy decides where the bulk
//! ends.

use std::fmt;
use std::sync::Arc;

/// A committed, ordered batch of command lines
///
/// # Design
///
/// - Commands are stored behind an `Arc<[String]>`
/// - Cloning a `Bulk` is O(1), so one committed bulk can be snapshotted into
///   several sink queues without copying the command text
/// - A `Bulk` is immutable once built
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bulk {
    commands: Arc<[String]>,
}

impl Bulk {
    /// Create a bulk from an ordered list of commands
    pub fn new(commands: Vec<String>) -> Self {
        Self {
            commands: commands.into(),
        }
    }

    /// Create an empty bulk
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of commands in this bulk
    #[inline]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the bulk has no commands
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Commands in commit order
    #[inline]
    pub fn commands(&self) -> &[String] {
        &self.commands
    }

    /// Iterate over the commands in commit order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().map(String::as_str)
    }

    /// Copy the commands out into an owned vector
    pub fn into_commands(self) -> Vec<String> {
        self.commands.to_vec()
    }

    /// Join the commands with a separator
    pub fn join(&self, sep: &str) -> String {
        self.commands.join(sep)
    }
}

impl Default for Bulk {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Bulk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "bulk: {}", self.join(", "))
    }
}

impl From<Vec<String>> for Bulk {
    fn from(commands: Vec<String>) -> Self {
        Self::new(commands)
    }
}

impl<'a> FromIterator<&'a str> for Bulk {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(str::to_owned).collect())
    }
}

/// Pending bulk accumulated by a batch policy
///
/// `finish` hands the pending commands out as a `Bulk` and leaves the builder
/// empty, ready for the next bulk.
#[derive(Debug, Default)]
pub struct BulkBuilder {
    pending: Vec<String>,
}

impl BulkBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a command to the pending bulk
    ///
    /// Returns the pending size after the append.
    pub fn push(&mut self, command: impl Into<String>) -> usize {
        self.pending.push(command.into());
        self.pending.len()
    }

    /// Number of pending commands
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check if nothing is pending
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Take the pending commands as a finished bulk, clearing the builder
    pub fn finish(&mut self) -> Bulk {
        Bulk::new(std::mem::take(&mut self.pending))
    }
}
