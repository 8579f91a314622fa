//! Process-wide session API
//!
//! Free functions over one lazily created registry, for callers that only
//! hold a handle (a thin CLI, a network listener).
//!
//! ```no_run
//! let handle = bulk_pipeline::connect(3)?;
//! bulk_pipeline::receive(handle, b"1\n2\n3\n4")?;
//! let report = bulk_pipeline::disconnect(handle)?;
//! println!("{report}");
//! # Ok::<(), bulk_pipeline::PipelineError>(())
//! ```
//!
//! The registry lock is held while a chunk is dispatched, which never blocks
//! on a sink. `disconnect` removes the session under the lock and joins the
//! sink threads after releasing it.

use std::sync::LazyLock;

use parking_lot::Mutex;

use crate::error::Result;
use crate::registry::SessionRegistry;
use crate::session::{SessionId, SessionOptions, SessionReport};

static REGISTRY: LazyLock<Mutex<SessionRegistry>> =
    LazyLock::new(|| Mutex::new(SessionRegistry::new()));

/// Open a session with the default sinks
pub fn connect(bulk_size: usize) -> Result<SessionId> {
    REGISTRY.lock().connect(bulk_size)
}

/// Open a session with explicit sink options
pub fn connect_with(options: SessionOptions) -> Result<SessionId> {
    REGISTRY.lock().connect_with(options)
}

/// Feed a chunk of bytes to a session
pub fn receive(handle: SessionId, data: &[u8]) -> Result<()> {
    REGISTRY.lock().receive(handle, data)
}

/// Close a session and return its report
pub fn disconnect(handle: SessionId) -> Result<SessionReport> {
    let session = REGISTRY.lock().take(handle)?;
    Ok(session.finish())
}
