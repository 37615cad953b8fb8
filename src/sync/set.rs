//! Thread-safe hash set.
//!
//! `Set<T>` wraps an `FxHashSet<T>` in a `parking_lot::RwLock`: membership
//! queries and snapshots share the read lock, mutations take the write lock.
//! Binary operations lock both operands through
//! [`read_pair`](super::lock_order), so `a.union(&b)` and `b.union(&a)` may
//! run concurrently.
//!
//! ## Operations
//!
//! | Operation                 | Time          | Lock            |
//! |---------------------------|---------------|-----------------|
//! | `add` / `remove`          | O(1) average  | write           |
//! | `contains` / `len`        | O(1) average  | read            |
//! | `pop`                     | O(1) average  | write           |
//! | `to_vec` / `for_each_while` | O(n)        | read            |
//! | `union` / `difference`    | O(n + m)      | read, both sets |
//! | `intersection`            | O(min(n, m))  | read, both sets |
//!
//! ## Example
//!
//! ```
//! use synckit::sync::Set;
//!
//! let a: Set<u32> = [1, 2, 3].into_iter().collect();
//! let b: Set<u32> = [2, 3, 4].into_iter().collect();
//!
//! let mut both = a.intersection(&b).to_vec();
//! both.sort_unstable();
//! assert_eq!(both, vec![2, 3]);
//! assert!(a.union(&b).is_superset(&a));
//! ```

use std::fmt;
use std::hash::Hash;

use parking_lot::RwLock;
use rustc_hash::FxHashSet;

use super::lock_order::{InstanceId, read_pair};

/// Read/write-locked set of hashable values.
pub struct Set<T> {
    id: InstanceId,
    inner: RwLock<FxHashSet<T>>,
}

impl<T> Set<T>
where
    T: Eq + Hash + Clone,
{
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::from_set(FxHashSet::default())
    }

    /// Creates an empty set with room for `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_set(FxHashSet::with_capacity_and_hasher(
            capacity,
            Default::default(),
        ))
    }

    fn from_set(set: FxHashSet<T>) -> Self {
        Self {
            id: InstanceId::next(),
            inner: RwLock::new(set),
        }
    }

    fn pair(&self) -> (&RwLock<FxHashSet<T>>, InstanceId) {
        (&self.inner, self.id)
    }

    /// Returns this set's lock-ordering identity.
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    /// Inserts `item`; returns `true` if it was not already present.
    pub fn add(&self, item: T) -> bool {
        let mut set = self.inner.write();
        set.insert(item)
    }

    /// Inserts every item under one write lock.
    pub fn add_all(&self, items: impl IntoIterator<Item = T>) {
        let mut set = self.inner.write();
        set.extend(items);
    }

    /// Removes `item`; returns `true` if it was present.
    pub fn remove(&self, item: &T) -> bool {
        let mut set = self.inner.write();
        set.remove(item)
    }

    /// Removes every listed item under one write lock.
    pub fn remove_all<'a>(&self, items: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        let mut set = self.inner.write();
        for item in items {
            set.remove(item);
        }
    }

    /// Returns `true` if `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        let set = self.inner.read();
        set.contains(item)
    }

    /// Removes and returns an arbitrary item, or `None` if empty.
    pub fn pop(&self) -> Option<T> {
        let mut set = self.inner.write();
        let key = set.iter().next()?.clone();
        set.take(&key)
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        let set = self.inner.read();
        set.len()
    }

    /// Returns `true` if the set has no items.
    pub fn is_empty(&self) -> bool {
        let set = self.inner.read();
        set.is_empty()
    }

    /// Removes all items.
    pub fn clear(&self) {
        let mut set = self.inner.write();
        set.clear();
    }

    /// Returns an independent copy of the items in unspecified order.
    pub fn to_vec(&self) -> Vec<T> {
        let set = self.inner.read();
        set.iter().cloned().collect()
    }

    /// Calls `f` on each item until it returns `false`.
    ///
    /// `f` runs under the read lock and must not mutate this set.
    pub fn for_each_while(&self, mut f: impl FnMut(&T) -> bool) {
        let set = self.inner.read();
        for item in set.iter() {
            if !f(item) {
                break;
            }
        }
    }

    /// Returns a new set with the items of both sets.
    pub fn union(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let mut out =
            FxHashSet::with_capacity_and_hasher(left.len() + right.len(), Default::default());
        out.extend(left.iter().cloned());
        out.extend(right.iter().cloned());
        Self::from_set(out)
    }

    /// Returns a new set with the items present in both sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let (small, large) = if left.len() <= right.len() {
            (left, right)
        } else {
            (right, left)
        };
        let out = small
            .iter()
            .filter(|item| large.contains(*item))
            .cloned()
            .collect();
        Self::from_set(out)
    }

    /// Returns a new set with the items of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let out = left
            .iter()
            .filter(|item| !right.contains(*item))
            .cloned()
            .collect();
        Self::from_set(out)
    }

    /// Returns a new set with the items in exactly one of the two sets.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let out = left.symmetric_difference(right).cloned().collect();
        Self::from_set(out)
    }

    /// Returns `true` if every item of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        left.len() <= right.len() && left.iter().all(|item| right.contains(item))
    }

    /// Returns `true` if every item of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if both sets hold exactly the same items.
    pub fn set_eq(&self, other: &Self) -> bool {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        left.len() == right.len() && left.iter().all(|item| right.contains(item))
    }
}

impl<T> Default for Set<T>
where
    T: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Set<T>
where
    T: Eq + Hash + Clone,
{
    /// Copies the items into a new set with its own lock and identity.
    fn clone(&self) -> Self {
        let set = self.inner.read();
        Self::from_set(set.clone())
    }
}

impl<T> PartialEq for Set<T>
where
    T: Eq + Hash + Clone,
{
    fn eq(&self, other: &Self) -> bool {
        self.set_eq(other)
    }
}

impl<T> Eq for Set<T> where T: Eq + Hash + Clone {}

impl<T> FromIterator<T> for Set<T>
where
    T: Eq + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_set(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for Set<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let set = self.inner.read();
        f.debug_set().entries(set.iter()).finish()
    }
}
