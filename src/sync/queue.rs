//! Thread-safe FIFO queue over [`RingBuffer`].
//!
//! Every call takes the queue's `parking_lot::Mutex` for its whole duration,
//! so operations from any number of threads are serialized and each one
//! observes a consistent buffer. The lock is never held across calls and no
//! reference into the buffer escapes it: [`peek`](RingQueue::peek) clones,
//! [`peek_with`](RingQueue::peek_with) runs a closure under the lock, and
//! [`to_vec`](RingQueue::to_vec) copies.
//!
//! ```text
//!   thread A ─ enqueue ─┐
//!   thread B ─ dequeue ─┼──► Mutex<RingBuffer<T>> ──► head/tail/len
//!   thread C ─ peek ────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use std::thread;
//!
//! use synckit::sync::RingQueue;
//!
//! let queue = Arc::new(RingQueue::new());
//! let producers: Vec<_> = (0..4)
//!     .map(|t| {
//!         let queue = Arc::clone(&queue);
//!         thread::spawn(move || {
//!             for i in 0..100 {
//!                 queue.enqueue(t * 100 + i);
//!             }
//!         })
//!     })
//!     .collect();
//! for p in producers {
//!     p.join().unwrap();
//! }
//!
//! assert_eq!(queue.len(), 400);
//! let mut drained = queue.drain_all();
//! drained.sort_unstable();
//! assert_eq!(drained, (0..400).collect::<Vec<_>>());
//! ```

use parking_lot::Mutex;

use crate::ds::ring_buffer::RingBuffer;
use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::QueueMetricsSnapshot;

/// Mutex-guarded growable FIFO queue.
#[derive(Debug)]
pub struct RingQueue<T> {
    inner: Mutex<RingBuffer<T>>,
}

impl<T> RingQueue<T> {
    /// Creates an empty queue with the default capacity.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RingBuffer::new()),
        }
    }

    /// Creates an empty queue with `max(capacity, 1)` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(RingBuffer::with_capacity(capacity)),
        }
    }

    /// Appends `value` at the back of the queue.
    pub fn enqueue(&self, value: T) {
        let mut buf = self.inner.lock();
        buf.enqueue(value);
    }

    /// Appends `value` only if the lock is free; hands it back otherwise.
    pub fn try_enqueue(&self, value: T) -> Result<(), T> {
        match self.inner.try_lock() {
            Some(mut buf) => {
                buf.enqueue(value);
                Ok(())
            },
            None => Err(value),
        }
    }

    /// Removes and returns the oldest element, or `None` if empty.
    pub fn dequeue(&self) -> Option<T> {
        let mut buf = self.inner.lock();
        buf.dequeue()
    }

    /// Dequeues without blocking.
    ///
    /// Returns `None` both when the queue is empty and when the lock is held
    /// by another thread.
    pub fn try_dequeue(&self) -> Option<T> {
        let mut buf = self.inner.try_lock()?;
        buf.dequeue()
    }

    /// Runs `f` on the oldest element while holding the lock.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let buf = self.inner.lock();
        buf.peek().map(f)
    }

    /// Returns the number of queued elements.
    pub fn len(&self) -> usize {
        let buf = self.inner.lock();
        buf.len()
    }

    /// Returns `true` if no elements are queued.
    pub fn is_empty(&self) -> bool {
        let buf = self.inner.lock();
        buf.is_empty()
    }

    /// Returns the current slot count.
    pub fn capacity(&self) -> usize {
        let buf = self.inner.lock();
        buf.capacity()
    }

    /// Drops all queued elements. Capacity is retained.
    pub fn clear(&self) {
        let mut buf = self.inner.lock();
        buf.clear();
    }

    /// Removes every element in FIFO order under a single lock acquisition.
    pub fn drain_all(&self) -> Vec<T> {
        let mut buf = self.inner.lock();
        let mut out = Vec::with_capacity(buf.len());
        while let Some(value) = buf.dequeue() {
            out.push(value);
        }
        out
    }

    /// Validates the underlying buffer's invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let buf = self.inner.lock();
        buf.check_invariants()
    }

    /// Consumes the queue and returns the unsynchronized buffer.
    pub fn into_inner(self) -> RingBuffer<T> {
        self.inner.into_inner()
    }

    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        let buf = self.inner.lock();
        buf.metrics_snapshot()
    }

    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&self) {
        let mut buf = self.inner.lock();
        buf.reset_metrics();
    }
}

impl<T: Clone> RingQueue<T> {
    /// Returns a clone of the oldest element without removing it.
    pub fn peek(&self) -> Option<T> {
        self.peek_with(T::clone)
    }

    /// Returns an independent copy of the queued elements, oldest first.
    pub fn to_vec(&self) -> Vec<T> {
        let buf = self.inner.lock();
        buf.iter().cloned().collect()
    }
}

impl<T> Default for RingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<RingBuffer<T>> for RingQueue<T> {
    fn from(buf: RingBuffer<T>) -> Self {
        Self {
            inner: Mutex::new(buf),
        }
    }
}

impl<T> FromIterator<T> for RingQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<RingBuffer<T>>())
    }
}
