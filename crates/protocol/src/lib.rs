//! Bulk Protocol - Core types that flow from the batching pipeline to sinks
//!
//! This crate provides the foundational types shared by every other crate:
//! - `Bulk` - An ordered, committed batch of command lines
//! - `BulkBuilder` - The pending bulk a batch policy accumulates into
//! - Control markers that open and close a dynamic (transaction) bulk
//!
//! # Markers
//!
//! Markers are exact single-line tokens. There is no escaping: a command whose
//! whole text is `{` or `}` is always read as a marker.

mod bulk;
mod marker;

pub use bulk::{Bulk, BulkBuilder};
pub use marker::{CLOSE_MARKER, OPEN_MARKER, is_close_marker, is_open_marker};

/// Line terminator used to reassemble commands from raw chunks
pub const LINE_TERMINATOR: u8 = b'\n';
