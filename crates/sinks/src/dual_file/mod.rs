//! Dual-file sink - two worker threads writing one file per bulk
//!
//! Both workers pull from the same queue, so which worker writes a given bulk
//! is not deterministic. Command order inside a file is preserved; bulk order
//! across the two workers' files is not.
//!
//! # File Naming
//!
//! ```text
//! <dir>/bulk_file1_1700000000.log
//! <dir>/bulk_file1_1700000000_1.log   # second bulk in the same second
//! <dir>/bulk_file2_1700000000.log
//! ```
//!
//! Names are claimed with exclusive create, so the collision probe and the
//! claim are one atomic step even when both workers race for a name.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bulk_protocol::Bulk;
use chrono::Utc;

use crate::common::{Result, Sink, SinkError, SinkReport};
use crate::util::WorkerPool;

/// Worker thread names, one per worker
pub const FILE_THREAD_NAMES: [&str; 2] = ["file1", "file2"];

/// Upper bound on suffixes probed for one bulk before giving up
pub const MAX_NAME_ATTEMPTS: u32 = 10_000;

/// Configuration for dual-file sink
#[derive(Debug, Clone)]
pub struct DualFileConfig {
    /// Output directory path
    pub path: PathBuf,
}

impl Default for DualFileConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }
}

impl DualFileConfig {
    /// Create config with custom path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }
}

/// Dual-file sink persisting each bulk to its own file
pub struct DualFileSink {
    name: String,
    path: PathBuf,
    pool: WorkerPool,
}

impl DualFileSink {
    /// Create a dual-file sink, creating the output directory if needed
    pub fn new(config: DualFileConfig) -> Result<Self> {
        let name = String::from("dual_file");
        let path = config.path;

        fs::create_dir_all(&path).map_err(|e| SinkError::CreateDir {
            path: path.display().to_string(),
            source: e,
        })?;

        let dir = path.clone();
        let pool = WorkerPool::spawn(&name, &FILE_THREAD_NAMES, move |worker, bulk| {
            let timestamp = Utc::now().timestamp();
            let file_path = store_bulk(&dir, worker, timestamp, bulk, write_bulk)?;
            tracing::trace!(worker = %worker, path = %file_path.display(), commands = bulk.len(), "bulk written");
            Ok(())
        })?;

        tracing::info!(sink = %name, path = %path.display(), "dual-file sink starting");
        Ok(Self { name, path, pool })
    }

    /// Output directory
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for DualFileSink {
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

        let write_errors = self.pool.write_errors();
        for report in self.pool.reports() {
            tracing::info!(
                sink = %self.name,
                worker = %report.name,
                bulks = report.bulks,
                commands = report.commands,
                "dual-file sink shutting down"
            );
        }
        if write_errors > 0 {
            tracing::warn!(sink = %self.name, write_errors, "some bulks were not persisted");
        }
    }

    fn report(&mut self) -> Vec<SinkReport> {
        self.shutdown();
        self.pool.reports()
    }
}

/// File name for a worker, timestamp and collision suffix
fn file_name(worker: &str, timestamp: i64, attempt: u32) -> String {
    if attempt == 0 {
        format!("bulk_{worker}_{timestamp}.log")
    } else {
        format!("bulk_{worker}_{timestamp}_{attempt}.log")
    }
}

/// Claim the first unused name, appending an incrementing suffix on collision
fn claim_file(dir: &Path, worker: &str, timestamp: i64) -> Result<(PathBuf, File)> {
    for attempt in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(file_name(worker, timestamp, attempt));
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(SinkError::CreateFile {
                    path: path.display().to_string(),
                    source: e,
                });
            }
        }
    }

    Err(SinkError::NameExhausted {
        worker: worker.to_string(),
        timestamp,
        attempts: MAX_NAME_ATTEMPTS,
    })
}

/// Claim a file for `bulk` and fill it with `write`
///
/// A failed write removes the claimed file, so every file left on disk holds
/// exactly one complete bulk.
fn store_bulk<W>(
    dir: &Path,
    worker: &str,
    timestamp: i64,
    bulk: &Bulk,
    write: W,
) -> Result<PathBuf>
where
    W: FnOnce(File, &Bulk) -> io::Result<()>,
{
    let (path, file) = claim_file(dir, worker, timestamp)?;
    if let Err(source) = write(file, bulk) {
        if let Err(e) = fs::remove_file(&path) {
            tracing::warn!(
                worker = %worker,
                path = %path.display(),
                error = %e,
                "failed to remove partial bulk file"
            );
        }
        return Err(SinkError::WriteFile {
            path: path.display().to_string(),
            source,
        });
    }
    Ok(path)
}

/// Write one command per line
fn write_bulk(file: File, bulk: &Bulk) -> io::Result<()> {
    let mut out = BufWriter::new(file);
    for command in bulk.iter() {
        writeln!(out, "{command}")?;
    }
    out.flush()
}
