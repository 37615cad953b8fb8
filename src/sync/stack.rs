//! Thread-safe LIFO stack.
//!
//! A `Vec<T>` behind a `parking_lot::Mutex`; the top of the stack is the end
//! of the vector, so push and pop are amortized O(1) with no wrap-around.
//!
//! ```text
//!   bottom                     top
//!   ┌─────┬─────┬─────┬─────┐
//!   │  A  │  B  │  C  │  D  │  ◄── push / pop / peek
//!   └─────┴─────┴─────┴─────┘
//! ```

use parking_lot::Mutex;

/// Mutex-guarded LIFO stack.
#[derive(Debug)]
pub struct Stack<T> {
    inner: Mutex<Vec<T>>,
}

impl<T> Stack<T> {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Vec::new()),
        }
    }

    /// Creates an empty stack with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Mutex::new(Vec::with_capacity(capacity)),
        }
    }

    /// Pushes `value` onto the top.
    pub fn push(&self, value: T) {
        let mut items = self.inner.lock();
        items.push(value);
    }

    /// Removes and returns the top element, or `None` if empty.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.inner.lock();
        items.pop()
    }

    /// Runs `f` on the top element while holding the lock.
    pub fn peek_with<R>(&self, f: impl FnOnce(&T) -> R) -> Option<R> {
        let items = self.inner.lock();
        items.last().map(f)
    }

    /// Swaps the two topmost elements.
    ///
    /// Returns `false` and leaves the stack unchanged if it holds fewer than
    /// two elements.
    pub fn swap_top(&self) -> bool {
        let mut items = self.inner.lock();
        let len = items.len();
        if len < 2 {
            return false;
        }
        items.swap(len - 1, len - 2);
        true
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        let items = self.inner.lock();
        items.len()
    }

    /// Returns `true` if the stack is empty.
    pub fn is_empty(&self) -> bool {
        let items = self.inner.lock();
        items.is_empty()
    }

    /// Drops all elements, keeping the allocation.
    pub fn clear(&self) {
        let mut items = self.inner.lock();
        items.clear();
    }

    /// Consumes the stack and returns its elements, bottom first.
    pub fn into_vec(self) -> Vec<T> {
        self.inner.into_inner()
    }
}

impl<T: Clone> Stack<T> {
    /// Returns a clone of the top element without removing it.
    pub fn peek(&self) -> Option<T> {
        self.peek_with(T::clone)
    }

    /// Returns an independent copy of the elements, bottom first.
    pub fn to_vec(&self) -> Vec<T> {
        let items = self.inner.lock();
        items.clone()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Stack<T> {
    /// Pushes items in iteration order; the last item ends on top.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            inner: Mutex::new(iter.into_iter().collect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn stack_lifo_order() {
        let stack = Stack::new();
        stack.push(1);
        stack.push(2);
        stack.push(3);
        assert_eq!(stack.peek(), Some(3));
        assert_eq!(stack.pop(), Some(3));
        assert_eq!(stack.pop(), Some(2));
        assert_eq!(stack.pop(), Some(1));
        assert_eq!(stack.pop(), None);
        assert_eq!(stack.peek(), None);
    }

    #[test]
    fn stack_swap_top() {
        let stack = Stack::with_capacity(4);
        assert!(!stack.swap_top());
        stack.push('a');
        assert!(!stack.swap_top());
        stack.push('b');
        stack.push('c');
        assert!(stack.swap_top());
        assert_eq!(stack.to_vec(), vec!['a', 'c', 'b']);
        assert_eq!(stack.pop(), Some('b'));
    }

    #[test]
    fn stack_clear_releases_values() {
        let tracked = Arc::new(());
        let stack = Stack::new();
        stack.push(Arc::clone(&tracked));
        stack.push(Arc::clone(&tracked));
        drop(stack.pop());
        assert_eq!(Arc::strong_count(&tracked), 2);

        stack.clear();
        assert!(stack.is_empty());
        assert_eq!(Arc::strong_count(&tracked), 1);
    }

    #[test]
    fn stack_from_iter_and_into_vec() {
        let stack: Stack<_> = (1..=3).collect();
        assert_eq!(stack.len(), 3);
        assert_eq!(stack.peek_with(|top| top * 10), Some(30));
        assert_eq!(stack.into_vec(), vec![1, 2, 3]);
    }
}
