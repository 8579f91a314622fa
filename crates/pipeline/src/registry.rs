//! Session registry - handle table behind the connect / receive / disconnect API
//!
//! Handles are never reused, so a handle that has been disconnected stays
//! invalid for the lifetime of the registry.

use std::collections::HashMap;

use crate::error::{PipelineError, Result};
use crate::session::{Session, SessionId, SessionOptions, SessionReport};

/// Table of live sessions keyed by handle
#[derive(Debug)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
    next_id: u64,
}

impl SessionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
            next_id: 1,
        }
    }

    /// Open a session with the default sinks and the given bulk size
    pub fn connect(&mut self, bulk_size: usize) -> Result<SessionId> {
        self.connect_with(SessionOptions::new(bulk_size))
    }

    /// Open a session with explicit sink options
    pub fn connect_with(&mut self, options: SessionOptions) -> Result<SessionId> {
        self.insert(|id| Session::open(id, options))
    }

    /// Register a session built for the next free handle
    ///
    /// The handle is only consumed if `build` succeeds.
    pub fn insert(&mut self, build: impl FnOnce(SessionId) -> Result<Session>) -> Result<SessionId> {
        let id = SessionId::new(self.next_id);
        let session = build(id)?;
        self.next_id += 1;
        self.sessions.insert(id, session);
        Ok(id)
    }

    /// Feed a chunk of bytes to a session
    pub fn receive(&mut self, id: SessionId, data: &[u8]) -> Result<()> {
        let session = self
            .sessions
            .get_mut(&id)
            .ok_or(PipelineError::InvalidHandle(id))?;
        session.receive(data);
        Ok(())
    }

    /// Remove a session without closing it
    pub fn take(&mut self, id: SessionId) -> Result<Session> {
        self.sessions
            .remove(&id)
            .ok_or(PipelineError::InvalidHandle(id))
    }

    /// Close a session: final flush, sink shutdown, handle invalidated
    pub fn disconnect(&mut self, id: SessionId) -> Result<SessionReport> {
        Ok(self.take(id)?.finish())
    }

    /// Check whether a handle refers to a live session
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }

    /// Number of live sessions
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Check if no session is live
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
