//! Batch policy - decides where one bulk ends and the next begins
//!
//! Two states, held by value and replaced wholesale on transition:
//!
//! | State | Input | Action | Next |
//! |-------|-------|--------|------|
//! | Sized | `{` | commit pending (may be empty) | Dynamic(depth 0) |
//! | Sized | line | append; commit when pending reaches max | Sized |
//! | Dynamic | `{` | depth += 1 | Dynamic |
//! | Dynamic | `}` at depth > 0 | depth -= 1 | Dynamic |
//! | Dynamic | `}` at depth 0 | commit pending | Sized |
//! | Dynamic | line | append | Dynamic |
//!
//! Markers are consumed and never appear in a committed bulk.

use bulk_protocol::{Bulk, BulkBuilder, is_close_marker, is_open_marker};

/// Batch policy state machine
#[derive(Debug)]
pub enum BatchPolicy {
    /// Commit every `max` lines
    Sized { pending: BulkBuilder },

    /// Unbounded bulk closed by a `}` at nesting depth 0
    Dynamic { pending: BulkBuilder, depth: usize },
}

impl BatchPolicy {
    /// Initial policy for every sink
    pub fn sized() -> Self {
        Self::Sized {
            pending: BulkBuilder::new(),
        }
    }

    /// Policy entered on an open marker
    pub fn dynamic() -> Self {
        Self::Dynamic {
            pending: BulkBuilder::new(),
            depth: 0,
        }
    }

    /// Feed one line
    ///
    /// Returns the committed bulk when this line ends one. A bulk committed by
    /// an open marker may be empty; sinks drop empty bulks.
    pub fn update(&mut self, line: &str, max_size: usize) -> Option<Bulk> {
        match self {
            Self::Sized { pending } => {
                if is_open_marker(line) {
                    let bulk = pending.finish();
                    *self = Self::dynamic();
                    return Some(bulk);
                }
                (pending.push(line) >= max_size).then(|| pending.finish())
            }
            Self::Dynamic { pending, depth } => {
                if is_open_marker(line) {
                    *depth += 1;
                    None
                } else if is_close_marker(line) {
                    if *depth > 0 {
                        *depth -= 1;
                        return None;
                    }
                    let bulk = pending.finish();
                    *self = Self::sized();
                    Some(bulk)
                } else {
                    pending.push(line);
                    None
                }
            }
        }
    }

    /// Commit whatever is pending without changing state
    pub fn flush(&mut self) -> Bulk {
        self.pending_mut().finish()
    }

    /// Check if the policy is in dynamic mode
    #[inline]
    pub fn is_dynamic(&self) -> bool {
        matches!(self, Self::Dynamic { .. })
    }

    /// Nesting depth of unmatched open markers (0 in sized mode)
    #[inline]
    pub fn depth(&self) -> usize {
        match self {
            Self::Sized { .. } => 0,
            Self::Dynamic { depth, .. } => *depth,
        }
    }

    /// Number of pending commands
    #[inline]
    pub fn pending_len(&self) -> usize {
        match self {
            Self::Sized { pending } | Self::Dynamic { pending, .. } => pending.len(),
        }
    }

    fn pending_mut(&mut self) -> &mut BulkBuilder {
        match self {
            Self::Sized { pending } | Self::Dynamic { pending, .. } => pending,
        }
    }
}

impl Default for BatchPolicy {
    fn default() -> Self {
        Self::sized()
    }
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod policy_test;
