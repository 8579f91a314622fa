//! Named worker threads competing for one work queue
//!
//! ```text
//! [Sink::post_bulk] --Bulk--> [WorkQueue] --> [worker "file1"] --> handler
//!                                         \-> [worker "file2"] --> handler
//! ```
//!
//! Every worker owns its own `SinkMetrics`; handlers never touch batch policy
//! or session state. `shutdown` closes the queue, lets the workers drain it
//! and joins each thread exactly once. Dropping the pool shuts it down.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use bulk_protocol::Bulk;

use super::rate_limited_logger::{DEFAULT_LOG_INTERVAL, RateLimitedLogger};
use super::work_queue::WorkQueue;
use crate::common::{Result, SinkError, SinkMetrics, SinkReport};

struct Worker {
    name: String,
    metrics: Arc<SinkMetrics>,
    handle: Option<JoinHandle<()>>,
}

/// Pool of named worker threads sharing one unbounded queue
pub struct WorkerPool {
    /// Owning sink name, for logs and thread names
    sink: String,
    queue: Arc<WorkQueue<Bulk>>,
    workers: Vec<Worker>,
}

impl WorkerPool {
    /// Spawn one thread per worker name
    ///
    /// `handler` runs on a worker thread for every dequeued bulk and receives
    /// the worker's name. Its errors are logged and counted, never propagated
    /// to the producer.
    ///
    /// If a thread fails to start, the workers already running are shut down
    /// before the error is returned.
    pub fn spawn<H>(sink: &str, worker_names: &[&str], handler: H) -> Result<Self>
    where
        H: Fn(&str, &Bulk) -> Result<()> + Send + Sync + 'static,
    {
        let handler = Arc::new(handler);
        let logger = Arc::new(RateLimitedLogger::new(sink, DEFAULT_LOG_INTERVAL));
        let mut pool = Self {
            sink: sink.to_string(),
            queue: Arc::new(WorkQueue::new()),
            workers: Vec::with_capacity(worker_names.len()),
        };

        for &name in worker_names {
            let metrics = Arc::new(SinkMetrics::new());
            let queue = Arc::clone(&pool.queue);
            let handler = Arc::clone(&handler);
            let logger = Arc::clone(&logger);
            let worker_metrics = Arc::clone(&metrics);
            let worker_name = name.to_string();

            let handle = thread::Builder::new()
                .name(format!("{sink}-{name}"))
                .spawn(move || {
                    run_worker(&worker_name, &queue, &*handler, &worker_metrics, &logger);
                })
                .map_err(|e| SinkError::spawn(name, e))?;

            pool.workers.push(Worker {
                name: name.to_string(),
                metrics,
                handle: Some(handle),
            });
        }

        tracing::debug!(sink = %pool.sink, workers = pool.workers.len(), "worker pool started");
        Ok(pool)
    }

    /// Queue a bulk for the workers
    ///
    /// Returns the bulk back if the pool has already been shut down.
    pub fn submit(&self, bulk: Bulk) -> std::result::Result<(), Bulk> {
        self.queue.push(bulk)
    }

    /// Number of bulks waiting for a worker
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Check whether `shutdown` has run
    pub fn is_shut_down(&self) -> bool {
        self.workers.iter().all(|w| w.handle.is_none())
    }

    /// Close the queue, let the workers drain it and join them
    ///
    /// Idempotent: a second call finds no handles left to join.
    pub fn shutdown(&mut self) {
        self.queue.close();

        for worker in &mut self.workers {
            let Some(handle) = worker.handle.take() else {
                continue;
            };
            if handle.join().is_err() {
                tracing::error!(sink = %self.sink, worker = %worker.name, "worker thread panicked");
            }
        }
    }

    /// One report line per worker, in spawn order
    pub fn reports(&self) -> Vec<SinkReport> {
        self.workers
            .iter()
            .map(|w| SinkReport::from_snapshot(&w.name, w.metrics.snapshot()))
            .collect()
    }

    /// Sum of write errors across all workers
    pub fn write_errors(&self) -> u64 {
        self.workers
            .iter()
            .map(|w| w.metrics.snapshot().write_errors)
            .sum()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Worker loop: pop until the queue is closed and drained
fn run_worker<H>(
    name: &str,
    queue: &WorkQueue<Bulk>,
    handler: &H,
    metrics: &SinkMetrics,
    logger: &RateLimitedLogger,
) where
    H: Fn(&str, &Bulk) -> Result<()>,
{
    while let Some(bulk) = queue.pop_blocking() {
        match handler(name, &bulk) {
            Ok(()) => metrics.record_bulk(bulk.len() as u64),
            Err(e) => {
                metrics.write_error();
                logger.error(name, "failed to process bulk", &e);
            }
        }
    }

    let snapshot = metrics.snapshot();
    tracing::debug!(
        worker = %name,
        bulks = snapshot.bulks,
        commands = snapshot.commands,
        "worker drained queue"
    );
}
