//! Unbounded FIFO shared between one producer and N consumer threads
//!
//! A single `parking_lot::Mutex` guards both the items and the closed flag;
//! one `Condvar` wakes consumers on push and on close.
//!
//! ```text
//! [post_bulk] --push--> [VecDeque] --pop_blocking--> [worker 1]
//!                                  --pop_blocking--> [worker 2]
//! ```
//!
//! Closing is graceful: consumers keep popping until the queue is empty and
//! only then observe the close.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

struct QueueState<T> {
    items: VecDeque<T>,
    closed: bool,
}

/// Unbounded blocking work queue
pub struct WorkQueue<T> {
    state: Mutex<QueueState<T>>,
    ready: Condvar,
}

impl<T> WorkQueue<T> {
    /// Create an empty, open queue
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                items: VecDeque::new(),
                closed: false,
            }),
            ready: Condvar::new(),
        }
    }

    /// Push an item and wake one consumer
    ///
    /// Returns the item back if the queue has been closed.
    pub fn push(&self, item: T) -> Result<(), T> {
        {
            let mut state = self.state.lock();
            if state.closed {
                return Err(item);
            }
            state.items.push_back(item);
        }
        self.ready.notify_one();
        Ok(())
    }

    /// Block until an item is available or the queue is closed and drained
    ///
    /// Returns `None` only when the queue is closed and empty.
    pub fn pop_blocking(&self) -> Option<T> {
        let mut state = self.state.lock();
        loop {
            if let Some(item) = state.items.pop_front() {
                return Some(item);
            }
            if state.closed {
                return None;
            }
            self.ready.wait(&mut state);
        }
    }

    /// Close the queue and wake every consumer
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.ready.notify_all();
    }

    /// Check whether the queue has been closed
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Number of queued items
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Check if no items are queued
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_fifo_order() {
        let queue = WorkQueue::new();
        for i in 0..5 {
            assert!(queue.push(i).is_ok());
        }
        queue.close();

        let drained: Vec<_> = std::iter::from_fn(|| queue.pop_blocking()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_push_after_close_returns_item() {
        let queue = WorkQueue::new();
        queue.close();

        assert_eq!(queue.push("late"), Err("late"));
        assert!(queue.is_closed());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_close_drains_before_none() {
        let queue = WorkQueue::new();
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.close();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_blocking(), Some(1));
        assert_eq!(queue.pop_blocking(), Some(2));
        assert_eq!(queue.pop_blocking(), None);
        assert_eq!(queue.pop_blocking(), None);
    }

    #[test]
    fn test_close_wakes_blocked_consumers() {
        let queue = Arc::new(WorkQueue::<u32>::new());

        let consumers: Vec<_> = (0..2)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || queue.pop_blocking())
            })
            .collect();

        queue.close();

        for consumer in consumers {
            assert_eq!(consumer.join().unwrap(), None);
        }
    }

    #[test]
    fn test_two_consumers_see_every_item_once() {
        let queue = Arc::new(WorkQueue::new());

        let consumers: Vec<_> = (0..2)
            .map(|_| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    let mut seen = Vec::new();
                    while let Some(item) = queue.pop_blocking() {
                        seen.push(item);
                    }
                    seen
                })
            })
            .collect();

        for i in 0..1000 {
            queue.push(i).unwrap();
        }
        queue.close();

        let mut all: Vec<u32> = consumers
            .into_iter()
            .flat_map(|c| c.join().unwrap())
            .collect();
        all.sort_unstable();
        assert_eq!(all, (0..1000).collect::<Vec<_>>());
    }
}
