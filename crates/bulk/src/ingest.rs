//! Stdin ingest loop
//!
//! Pumps a reader into one session in fixed-size chunks. Chunk boundaries
//! are arbitrary; the session reassembles lines.

use std::io::{self, Read};

use anyhow::{Context, Result};
use bulk_pipeline::{SessionId, SessionOptions, SessionReport};
use tracing::{debug, info};

/// Run one session over `reader` until EOF and return its report
///
/// The session is disconnected even when reading fails, so sink threads are
/// always joined and pending commands flushed.
pub fn run<R: Read>(options: SessionOptions, reader: R, chunk_size: usize) -> Result<SessionReport> {
    let handle = bulk_pipeline::connect_with(options).context("opening session")?;
    info!(session = %handle, "session connected");

    let pumped = pump(handle, reader, chunk_size);
    let report = bulk_pipeline::disconnect(handle).context("closing session")?;
    let bytes = pumped?;

    info!(session = %handle, bytes, "session disconnected");
    Ok(report)
}

/// Feed `reader` to the session chunk by chunk, returning bytes read
fn pump<R: Read>(handle: SessionId, mut reader: R, chunk_size: usize) -> Result<u64> {
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => return Ok(total),
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("reading input"),
        };

        total += n as u64;
        debug!(session = %handle, bytes = n, "chunk received");
        bulk_pipeline::receive(handle, &buf[..n])?;
    }
}
