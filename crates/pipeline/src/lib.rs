//! Bulk - Pipeline
//!
//! Reassembles raw byte chunks into lines, groups lines into bulks with a
//! switchable batch policy and fans every committed bulk out to the sinks
//! subscribed to the session.
//!
//! # Architecture
//!
//! ```text
//! [receive(bytes)] --> [Session: line reassembly]
//!                            |
//!                            +--line--> [BatchPolicy] --Bulk--> [Stats]
//!                            +--line--> [BatchPolicy] --Bulk--> [Console] --> queue --> log
//!                            +--line--> [BatchPolicy] --Bulk--> [Dual-File] --> queue --> file1 / file2
//! ```
//!
//! # Key Design
//!
//! - **Synchronous caller**: batching decisions run inline in `receive`
//! - **Policy per sink**: each subscription owns its own `BatchPolicy`
//! - **Fixed sink set**: sinks are subscribed at connect, never removed
//! - **Graceful close**: `disconnect` flushes, drains every queue and joins
//!   every worker thread before returning
//!
//! # Example
//!
//! ```no_run
//! use bulk_pipeline::{SessionRegistry, SessionOptions};
//!
//! let mut sessions = SessionRegistry::new();
//! let handle = sessions.connect_with(SessionOptions::new(3))?;
//!
//! sessions.receive(handle, b"1\n2\n")?;
//! sessions.receive(handle, b"3\n{\na\n}\n")?;
//!
//! let report = sessions.disconnect(handle)?;
//! println!("{report}");
//! # Ok::<(), bulk_pipeline::PipelineError>(())
//! ```

mod api;
mod error;
mod policy;
mod registry;
mod session;
mod subscription;

pub use api::{connect, connect_with, disconnect, receive};
pub use error::{PipelineError, Result};
pub use policy::BatchPolicy;
pub use registry::SessionRegistry;
pub use session::{Session, SessionId, SessionOptions, SessionReport};
pub use subscription::Subscription;

// Re-export key types from dependencies for convenience
pub use bulk_protocol::{Bulk, CLOSE_MARKER, OPEN_MARKER};
pub use bulk_sinks::{ConsoleConfig, DualFileConfig, Sink, SinkReport};
