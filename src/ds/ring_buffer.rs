//! Growable circular buffer with FIFO semantics.
//!
//! Stores elements in a fixed-size slot array and tracks the oldest element
//! (`head`), the next free slot (`tail`), and the live count (`len`). When the
//! buffer is full, the next enqueue doubles the slot array and linearizes the
//! live span so FIFO order survives growth.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                         RingBuffer<T> (cap = 4)                       │
//!   │                                                                       │
//!   │   slots: Box<[Option<T>]>                                             │
//!   │                                                                       │
//!   │   Index:     0        1        2        3                             │
//!   │            ┌────────┬────────┬────────┬────────┐                      │
//!   │   slots:   │ Some(D)│  None  │ Some(B)│ Some(C)│                      │
//!   │            └────────┴────────┴────────┴────────┘                      │
//!   │                        ▲        ▲                                     │
//!   │                      tail     head          len = 3                   │
//!   │                                                                       │
//!   │   Live span: head .. head + len (mod cap)  =>  B, C, D                │
//!   │   Invariant: tail == (head + len) % cap                               │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Growth
//!
//! ```text
//!   enqueue(F) with len == cap == 4, head == 2:
//!
//!   old:  [ D  E  B  C ]          live order: B C D E
//!                 ▲
//!               head
//!        │
//!        ▼  new[i] = old[(head + i) % old_cap]   for i in 0..len
//!
//!   new:  [ B  C  D  E  F  -  -  - ]
//!           ▲              ▲
//!         head = 0       tail = 5 (F written at len)
//! ```
//!
//! ## Performance Characteristics
//!
//! | Operation  | Time        | Notes                                   |
//! |-----------|-------------|-----------------------------------------|
//! | `enqueue` | O(1) amort. | Doubles capacity when full              |
//! | `dequeue` | O(1)        | Moves the value out, slot left `None`   |
//! | `peek`    | O(1)        | No mutation                             |
//! | `clear`   | O(len)      | Drops live values, keeps capacity       |
//!
//! ## Notes
//! - Capacity never shrinks and is always at least 1.
//! - Dequeued and cleared slots release their value immediately instead of
//!   holding it until the slot is overwritten.
//! - `debug_validate_invariants()` is available in debug/test builds.

use std::fmt;
use std::iter::FusedIterator;

use crate::error::InvariantError;
#[cfg(feature = "metrics")]
use crate::metrics::metrics_impl::QueueMetrics;
#[cfg(feature = "metrics")]
use crate::metrics::snapshot::QueueMetricsSnapshot;
#[cfg(feature = "metrics")]
use crate::metrics::traits::{
    MetricsSnapshotProvider, QueueMetricsReadRecorder, QueueMetricsRecorder,
};

/// Slot count used by [`RingBuffer::new`].
pub const DEFAULT_CAPACITY: usize = 2;

/// Unsynchronized growable ring buffer.
///
/// This is the single-threaded core behind
/// [`RingQueue`](crate::sync::RingQueue). Use it directly when the buffer is
/// owned by one thread or already protected by an outer lock.
///
/// # Example
///
/// ```
/// use synckit::ds::RingBuffer;
///
/// let mut buf = RingBuffer::with_capacity(2);
/// buf.enqueue("a");
/// buf.enqueue("b");
/// buf.enqueue("c"); // grows to 4 slots
///
/// assert_eq!(buf.capacity(), 4);
/// assert_eq!(buf.dequeue(), Some("a"));
/// assert_eq!(buf.peek(), Some(&"b"));
/// assert_eq!(buf.len(), 2);
/// ```
pub struct RingBuffer<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    len: usize,
    #[cfg(feature = "metrics")]
    metrics: QueueMetrics,
}

impl<T> RingBuffer<T> {
    /// Creates an empty buffer with [`DEFAULT_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty buffer with `max(capacity, 1)` slots.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: alloc_slots(capacity.max(1)),
            head: 0,
            tail: 0,
            len: 0,
            #[cfg(feature = "metrics")]
            metrics: QueueMetrics::default(),
        }
    }

    /// Returns the current number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if there are no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends `value` at the back, growing the slot array first if full.
    ///
    /// Never fails for capacity reasons.
    pub fn enqueue(&mut self, value: T) {
        #[cfg(feature = "metrics")]
        self.metrics.record_enqueue();

        if self.len == self.capacity() {
            self.grow();
        }

        self.slots[self.tail] = Some(value);
        self.tail = (self.tail + 1) % self.capacity();
        self.len += 1;
    }

    /// Removes and returns the oldest element, or `None` if empty.
    pub fn dequeue(&mut self) -> Option<T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_dequeue_call();

        if self.len == 0 {
            #[cfg(feature = "metrics")]
            self.metrics.record_dequeue_empty();
            return None;
        }

        let value = self.slots[self.head].take();
        debug_assert!(value.is_some(), "live slot at head was empty");
        self.head = (self.head + 1) % self.capacity();
        self.len -= 1;

        #[cfg(feature = "metrics")]
        self.metrics.record_dequeue_found();
        value
    }

    /// Returns the oldest element without removing it.
    pub fn peek(&self) -> Option<&T> {
        #[cfg(feature = "metrics")]
        self.metrics.record_peek_call();

        if self.len == 0 {
            return None;
        }
        let value = self.slots[self.head].as_ref();

        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_peek_found();
        }
        value
    }

    /// Drops every live element and resets the indices. Capacity is kept.
    pub fn clear(&mut self) {
        #[cfg(feature = "metrics")]
        self.metrics.record_clear();

        let cap = self.capacity();
        for i in 0..self.len {
            self.slots[(self.head + i) % cap] = None;
        }
        self.head = 0;
        self.tail = 0;
        self.len = 0;
    }

    /// Returns a borrowed iterator from oldest to newest.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            pos: self.head,
            remaining: self.len,
        }
    }

    /// Doubles the slot array and moves the live span to `0..len`.
    ///
    /// Only called with `len == capacity`.
    fn grow(&mut self) {
        let old_cap = self.capacity();
        let new_cap = old_cap.saturating_mul(2).max(1);
        let mut slots = alloc_slots(new_cap);

        for (i, slot) in slots.iter_mut().take(self.len).enumerate() {
            *slot = self.slots[(self.head + i) % old_cap].take();
        }

        self.slots = slots;
        self.head = 0;
        self.tail = self.len;

        #[cfg(feature = "metrics")]
        self.metrics.record_grow();
    }

    /// Validates index and occupancy invariants.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        let cap = self.capacity();
        if cap == 0 {
            return Err(InvariantError::new("ring buffer has zero capacity"));
        }
        if self.len > cap {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.len, cap
            )));
        }
        if self.head >= cap || self.tail >= cap {
            return Err(InvariantError::new(format!(
                "head {} or tail {} out of bounds for capacity {}",
                self.head, self.tail, cap
            )));
        }
        if self.tail != (self.head + self.len) % cap {
            return Err(InvariantError::new(format!(
                "tail {} != (head {} + len {}) % {}",
                self.tail, self.head, self.len, cap
            )));
        }
        for offset in 0..cap {
            let idx = (self.head + offset) % cap;
            let live = offset < self.len;
            if live != self.slots[idx].is_some() {
                return Err(InvariantError::new(format!(
                    "slot {} occupancy does not match live span",
                    idx
                )));
            }
        }
        Ok(())
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self) {
        if let Err(err) = self.check_invariants() {
            panic!("ring buffer invariant violated: {}", err);
        }
    }

    /// Returns a snapshot of the buffer's counters and gauges.
    #[cfg(feature = "metrics")]
    pub fn metrics_snapshot(&self) -> QueueMetricsSnapshot {
        self.snapshot()
    }

    /// Resets all counters to zero.
    #[cfg(feature = "metrics")]
    pub fn reset_metrics(&mut self) {
        self.metrics = QueueMetrics::default();
    }
}

fn alloc_slots<T>(capacity: usize) -> Box<[Option<T>]> {
    (0..capacity).map(|_| None).collect()
}

#[cfg(feature = "metrics")]
impl<T> MetricsSnapshotProvider<QueueMetricsSnapshot> for RingBuffer<T> {
    fn snapshot(&self) -> QueueMetricsSnapshot {
        QueueMetricsSnapshot {
            enqueue_calls: self.metrics.enqueue_calls,
            grow_events: self.metrics.grow_events,
            dequeue_calls: self.metrics.dequeue_calls,
            dequeue_found: self.metrics.dequeue_found,
            dequeue_empty: self.metrics.dequeue_empty,
            peek_calls: self.metrics.peek_calls.get(),
            peek_found: self.metrics.peek_found.get(),
            clear_calls: self.metrics.clear_calls,
            len: self.len,
            capacity: self.capacity(),
        }
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("items", &DebugItems(self))
            .finish()
    }
}

struct DebugItems<'a, T>(&'a RingBuffer<T>);

impl<T: fmt::Debug> fmt::Debug for DebugItems<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    /// Clones live elements into a fresh buffer of the same capacity.
    fn clone(&self) -> Self {
        let mut out = Self::with_capacity(self.capacity());
        for value in self.iter() {
            out.enqueue(value.clone());
        }
        #[cfg(feature = "metrics")]
        out.reset_metrics();
        out
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.enqueue(value);
        }
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut buf = Self::with_capacity(iter.size_hint().0.max(DEFAULT_CAPACITY));
        buf.extend(iter);
        buf
    }
}

/// Borrowed iterator over a [`RingBuffer`] in FIFO order.
#[derive(Debug)]
pub struct Iter<'a, T> {
    slots: &'a [Option<T>],
    pos: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let item = self.slots[self.pos].as_ref();
        self.pos = (self.pos + 1) % self.slots.len();
        self.remaining -= 1;
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
impl<T> FusedIterator for Iter<'_, T> {}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Owning iterator that dequeues in FIFO order.
#[derive(Debug)]
pub struct IntoIter<T> {
    buf: RingBuffer<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.dequeue()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.buf.len(), Some(self.buf.len()))
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for RingBuffer<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { buf: self }
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    #[test]
    fn ring_buffer_default_capacity() {
        let buf = RingBuffer::<u32>::new();
        assert_eq!(buf.capacity(), DEFAULT_CAPACITY);
        assert!(buf.is_empty());
        buf.debug_validate_invariants();
    }

    #[test]
    fn ring_buffer_zero_capacity_clamps_to_one() {
        let mut buf = RingBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        buf.enqueue(7);
        buf.enqueue(8);
        assert_eq!(buf.capacity(), 2);
        assert_eq!(buf.dequeue(), Some(7));
        assert_eq!(buf.dequeue(), Some(8));
        buf.debug_validate_invariants();
    }

    #[test]
    fn ring_buffer_fifo_order() {
        let mut buf = RingBuffer::new();
        for i in 0..100 {
            buf.enqueue(i);
        }
        let drained: Vec<_> = std::iter::from_fn(|| buf.dequeue()).collect();
        assert_eq!(drained, (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn ring_buffer_wraparound_then_grow_preserves_order() {
        let mut buf = RingBuffer::with_capacity(3);
        buf.enqueue(1);
        buf.enqueue(2);
        assert_eq!(buf.dequeue(), Some(1));
        buf.enqueue(3);
        buf.enqueue(4);
        assert_eq!(buf.len(), 3);
        assert_eq!(buf.capacity(), 3);
        buf.debug_validate_invariants();

        buf.enqueue(5);
        assert_eq!(buf.capacity(), 6);
        buf.debug_validate_invariants();

        assert_eq!(buf.dequeue(), Some(2));
        assert_eq!(buf.dequeue(), Some(3));
        assert_eq!(buf.dequeue(), Some(4));
        assert_eq!(buf.dequeue(), Some(5));
        assert_eq!(buf.dequeue(), None);
    }

    #[test]
    fn ring_buffer_grow_linearizes_from_head() {
        let mut buf = RingBuffer::with_capacity(4);
        buf.extend([10, 11, 12, 13]);
        buf.dequeue();
        buf.dequeue();
        buf.enqueue(14);
        buf.enqueue(15);
        // full and wrapped: head = 2
        assert_eq!(buf.head, 2);
        buf.enqueue(16);

        assert_eq!(buf.head, 0);
        assert_eq!(buf.tail, 5);
        assert_eq!(buf.iter().copied().collect::<Vec<_>>(), vec![12, 13, 14, 15, 16]);
        buf.debug_validate_invariants();
    }

    #[test]
    fn ring_buffer_empty_signal() {
        let mut buf = RingBuffer::<String>::new();
        assert_eq!(buf.dequeue(), None);
        assert_eq!(buf.peek(), None);

        buf.enqueue("x".to_string());
        buf.dequeue();
        assert_eq!(buf.dequeue(), None);
        assert_eq!(buf.peek(), None);
    }

    #[test]
    fn ring_buffer_peek_does_not_mutate() {
        let mut buf = RingBuffer::new();
        buf.enqueue('a');
        buf.enqueue('b');
        assert_eq!(buf.peek(), Some(&'a'));
        assert_eq!(buf.peek(), Some(&'a'));
        assert_eq!(buf.len(), 2);
    }

    #[test]
    fn ring_buffer_clear_keeps_capacity() {
        let mut buf = RingBuffer::new();
        buf.extend(0..10);
        let cap = buf.capacity();
        buf.clear();
        assert_eq!(buf.len(), 0);
        assert_eq!(buf.capacity(), cap);
        assert_eq!(buf.dequeue(), None);
        buf.debug_validate_invariants();

        // clearing an empty buffer is a no-op
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.capacity(), cap);
    }

    #[test]
    fn ring_buffer_dequeue_releases_value_immediately() {
        let tracked = Rc::new(());
        let mut buf = RingBuffer::new();
        buf.enqueue(Rc::clone(&tracked));
        buf.enqueue(Rc::clone(&tracked));
        assert_eq!(Rc::strong_count(&tracked), 3);

        drop(buf.dequeue());
        assert_eq!(Rc::strong_count(&tracked), 2);

        buf.clear();
        assert_eq!(Rc::strong_count(&tracked), 1);
    }

    #[test]
    fn ring_buffer_many_operations_never_fail() {
        let mut buf = RingBuffer::with_capacity(1);
        for i in 0..10_000 {
            buf.enqueue(i);
            if i % 3 == 0 {
                buf.dequeue();
            }
        }
        assert_eq!(buf.len(), 10_000 - 3334);
        buf.debug_validate_invariants();
    }

    #[test]
    fn ring_buffer_iterators_follow_fifo_order() {
        let mut buf: RingBuffer<_> = (1..=5).collect();
        buf.dequeue();
        buf.enqueue(6);

        let borrowed: Vec<_> = buf.iter().copied().collect();
        assert_eq!(borrowed, vec![2, 3, 4, 5, 6]);
        assert_eq!(buf.iter().len(), 5);

        let owned: Vec<_> = buf.into_iter().collect();
        assert_eq!(owned, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn ring_buffer_clone_is_independent() {
        let mut a = RingBuffer::with_capacity(3);
        a.extend(["x".to_string(), "y".to_string()]);
        let mut b = a.clone();
        b.enqueue("z".to_string());

        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 3);
        assert_eq!(b.capacity(), 3);
        assert_eq!(a.dequeue().as_deref(), Some("x"));
        assert_eq!(b.dequeue().as_deref(), Some("x"));
    }

    #[test]
    fn ring_buffer_debug_lists_items_in_order() {
        let mut buf = RingBuffer::with_capacity(2);
        buf.enqueue(1);
        buf.enqueue(2);
        buf.dequeue();
        buf.enqueue(3);
        let dbg = format!("{:?}", buf);
        assert!(dbg.contains("items: [2, 3]"));
    }

    #[test]
    fn ring_buffer_check_invariants_reports_corruption() {
        let mut buf = RingBuffer::with_capacity(4);
        buf.extend([1, 2]);
        buf.tail = 3;
        let err = buf.check_invariants().unwrap_err();
        assert!(err.message().contains("tail"));
    }

    #[cfg(feature = "metrics")]
    #[test]
    fn ring_buffer_records_metrics() {
        let mut buf = RingBuffer::with_capacity(1);
        buf.enqueue(1);
        buf.enqueue(2);
        let _ = buf.peek();
        buf.dequeue();
        buf.dequeue();
        buf.dequeue();
        buf.clear();

        let snap = buf.metrics_snapshot();
        assert_eq!(snap.enqueue_calls, 2);
        assert_eq!(snap.grow_events, 1);
        assert_eq!(snap.peek_calls, 1);
        assert_eq!(snap.peek_found, 1);
        assert_eq!(snap.dequeue_calls, 3);
        assert_eq!(snap.dequeue_found, 2);
        assert_eq!(snap.dequeue_empty, 1);
        assert_eq!(snap.clear_calls, 1);
        assert_eq!(snap.capacity, 2);
        assert_eq!(snap.len, 0);

        buf.reset_metrics();
        assert_eq!(buf.metrics_snapshot().enqueue_calls, 0);
    }
}
