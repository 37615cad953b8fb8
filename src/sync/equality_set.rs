//! Thread-safe set keyed by a caller-supplied equality function.
//!
//! For element types that are neither `Hash` nor `Eq` (floats, structs
//! compared by one field, ...). Items live in a `Vec<T>` behind a
//! `parking_lot::RwLock`, and every membership test is a linear scan with the
//! stored equality function.
//!
//! ## Cost
//!
//! There is no hashing shortcut: `add`, `remove` and `contains` are **O(n)**,
//! and binary operations are **O(n · m)**. Prefer [`Set`](super::Set) whenever
//! `T: Eq + Hash`.
//!
//! ## Example
//!
//! ```
//! use synckit::sync::EqualitySet;
//!
//! let close = |a: &f64, b: &f64| (a - b).abs() < 1e-9;
//! let set = EqualitySet::from_items(close, [0.1 + 0.2, 1.0]);
//!
//! assert!(set.contains(&0.3));
//! assert!(!set.add(0.30000000000000004));
//! assert_eq!(set.len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use super::lock_order::{InstanceId, read_pair};

/// Shared equality predicate used by [`EqualitySet`].
pub type EqualityFn<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Read/write-locked set that compares items with an equality function.
pub struct EqualitySet<T> {
    id: InstanceId,
    inner: RwLock<Vec<T>>,
    eq: EqualityFn<T>,
}

fn contains_by<T>(items: &[T], item: &T, eq: &EqualityFn<T>) -> bool {
    items.iter().any(|existing| eq(existing, item))
}

impl<T: Clone> EqualitySet<T> {
    /// Creates an empty set that treats `a` and `b` as equal when `eq(a, b)`.
    pub fn new(eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static) -> Self {
        Self::from_parts(Arc::new(eq), Vec::new())
    }

    /// Creates a set from `items`, dropping duplicates under `eq`.
    pub fn from_items(
        eq: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
        items: impl IntoIterator<Item = T>,
    ) -> Self {
        let set = Self::new(eq);
        set.add_all(items);
        set
    }

    fn from_parts(eq: EqualityFn<T>, items: Vec<T>) -> Self {
        Self {
            id: InstanceId::next(),
            inner: RwLock::new(items),
            eq,
        }
    }

    fn pair(&self) -> (&RwLock<Vec<T>>, InstanceId) {
        (&self.inner, self.id)
    }

    /// Returns this set's lock-ordering identity.
    pub fn instance_id(&self) -> InstanceId {
        self.id
    }

    /// Inserts `item` unless an equal item exists; returns `true` if inserted.
    pub fn add(&self, item: T) -> bool {
        let mut items = self.inner.write();
        if contains_by(&items, &item, &self.eq) {
            return false;
        }
        items.push(item);
        true
    }

    /// Inserts every item under one write lock, skipping duplicates.
    pub fn add_all(&self, new_items: impl IntoIterator<Item = T>) {
        let mut items = self.inner.write();
        for item in new_items {
            if !contains_by(&items, &item, &self.eq) {
                items.push(item);
            }
        }
    }

    /// Removes the first item equal to `item`; returns `true` if found.
    ///
    /// The last item takes the removed item's position.
    pub fn remove(&self, item: &T) -> bool {
        let mut items = self.inner.write();
        match items.iter().position(|existing| (self.eq)(existing, item)) {
            Some(idx) => {
                items.swap_remove(idx);
                true
            },
            None => false,
        }
    }

    /// Removes every listed item under one write lock.
    pub fn remove_all<'a>(&self, targets: impl IntoIterator<Item = &'a T>)
    where
        T: 'a,
    {
        let mut items = self.inner.write();
        for target in targets {
            if let Some(idx) = items.iter().position(|existing| (self.eq)(existing, target)) {
                items.swap_remove(idx);
            }
        }
    }

    /// Returns `true` if an item equal to `item` is present.
    pub fn contains(&self, item: &T) -> bool {
        let items = self.inner.read();
        contains_by(&items, item, &self.eq)
    }

    /// Removes and returns the last item in storage order, or `None` if empty.
    ///
    /// Storage order is insertion order until a [`remove`](Self::remove)
    /// moves the last item into the freed position.
    pub fn pop(&self) -> Option<T> {
        let mut items = self.inner.write();
        items.pop()
    }

    /// Returns the number of items.
    pub fn len(&self) -> usize {
        let items = self.inner.read();
        items.len()
    }

    /// Returns `true` if the set has no items.
    pub fn is_empty(&self) -> bool {
        let items = self.inner.read();
        items.is_empty()
    }

    /// Drops all items.
    pub fn clear(&self) {
        let mut items = self.inner.write();
        items.clear();
    }

    /// Returns an independent copy of the items in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        let items = self.inner.read();
        items.clone()
    }

    /// Calls `f` on each item until it returns `false`.
    ///
    /// `f` runs under the read lock and must not mutate this set.
    pub fn for_each_while(&self, mut f: impl FnMut(&T) -> bool) {
        let items = self.inner.read();
        for item in items.iter() {
            if !f(item) {
                break;
            }
        }
    }

    /// Returns a new set with the items of both sets.
    ///
    /// The result uses `self`'s equality function.
    pub fn union(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let mut out = Vec::with_capacity(left.len() + right.len());
        out.extend(left.iter().cloned());
        for item in right {
            if !contains_by(&out, item, &self.eq) {
                out.push(item.clone());
            }
        }
        Self::from_parts(Arc::clone(&self.eq), out)
    }

    /// Returns a new set with the items of `self` also present in `other`.
    pub fn intersection(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let out = left
            .iter()
            .filter(|item| contains_by(right, item, &self.eq))
            .cloned()
            .collect();
        Self::from_parts(Arc::clone(&self.eq), out)
    }

    /// Returns a new set with the items of `self` that are not in `other`.
    pub fn difference(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let out = left
            .iter()
            .filter(|item| !contains_by(right, item, &self.eq))
            .cloned()
            .collect();
        Self::from_parts(Arc::clone(&self.eq), out)
    }

    /// Returns a new set with the items in exactly one of the two sets.
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        let only_left = left.iter().filter(|item| !contains_by(right, item, &self.eq));
        let only_right = right.iter().filter(|item| !contains_by(left, item, &self.eq));
        let out = only_left.chain(only_right).cloned().collect();
        Self::from_parts(Arc::clone(&self.eq), out)
    }

    /// Returns `true` if every item of `self` is in `other`.
    pub fn is_subset(&self, other: &Self) -> bool {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        left.len() <= right.len() && left.iter().all(|item| contains_by(right, item, &self.eq))
    }

    /// Returns `true` if every item of `other` is in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        other.is_subset(self)
    }

    /// Returns `true` if both sets hold the same items under `self`'s equality.
    pub fn set_eq(&self, other: &Self) -> bool {
        let guard = read_pair(self.pair(), other.pair());
        let (left, right) = guard.sides();
        left.len() == right.len() && left.iter().all(|item| contains_by(right, item, &self.eq))
    }
}

impl<T: Clone> Clone for EqualitySet<T> {
    /// Copies the items into a new set sharing the same equality function.
    fn clone(&self) -> Self {
        let items = self.inner.read();
        Self::from_parts(Arc::clone(&self.eq), items.clone())
    }
}

impl<T: fmt::Debug> fmt::Debug for EqualitySet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items = self.inner.read();
        f.debug_set().entries(items.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct User {
        id: u32,
        name: &'static str,
    }

    fn same_id(a: &User, b: &User) -> bool {
        a.id == b.id
    }

    fn ids(set: &EqualitySet<User>) -> Vec<u32> {
        let mut ids: Vec<_> = set.to_vec().iter().map(|u| u.id).collect();
        ids.sort_unstable();
        ids
    }

    fn users(ids: &[u32]) -> EqualitySet<User> {
        EqualitySet::from_items(same_id, ids.iter().map(|&id| User { id, name: "u" }))
    }

    #[test]
    fn equality_set_dedups_by_function() {
        let set = EqualitySet::new(same_id);
        assert!(set.add(User { id: 1, name: "ann" }));
        assert!(!set.add(User { id: 1, name: "other" }));
        assert_eq!(set.len(), 1);
        assert_eq!(set.to_vec()[0].name, "ann");
        assert!(set.contains(&User { id: 1, name: "" }));
    }

    #[test]
    fn equality_set_remove_swaps_last() {
        let set = users(&[1, 2, 3]);
        assert!(set.remove(&User { id: 1, name: "" }));
        assert!(!set.remove(&User { id: 1, name: "" }));
        let order: Vec<_> = set.to_vec().iter().map(|u| u.id).collect();
        assert_eq!(order, vec![3, 2]);
    }

    #[test]
    fn equality_set_bulk_ops_and_pop() {
        let set = users(&[1, 2]);
        set.add_all([User { id: 2, name: "dup" }, User { id: 5, name: "e" }]);
        assert_eq!(ids(&set), vec![1, 2, 5]);

        set.remove_all(&[User { id: 1, name: "" }, User { id: 9, name: "" }]);
        assert_eq!(ids(&set), vec![2, 5]);

        // Removing id 1 moved the last item (5) into slot 0: storage is [5, 2].
        assert_eq!(set.pop().map(|u| u.id), Some(2));
        assert_eq!(set.pop().map(|u| u.id), Some(5));
        assert!(set.pop().is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn equality_set_pop_takes_last_in_storage_order() {
        let set = users(&[1, 2, 3]);
        assert_eq!(set.pop().map(|u| u.id), Some(3));

        set.add(User { id: 4, name: "d" });
        assert!(set.remove(&User { id: 1, name: "" }));
        // [1, 2, 4] -> swap_remove(0) -> [4, 2]
        assert_eq!(set.pop().map(|u| u.id), Some(2));
        assert_eq!(set.pop().map(|u| u.id), Some(4));
    }

    #[test]
    fn equality_set_algebra() {
        let a = users(&[1, 2, 3]);
        let b = users(&[3, 4]);

        assert_eq!(ids(&a.union(&b)), vec![1, 2, 3, 4]);
        assert_eq!(ids(&a.intersection(&b)), vec![3]);
        assert_eq!(ids(&a.difference(&b)), vec![1, 2]);
        assert_eq!(ids(&a.symmetric_difference(&b)), vec![1, 2, 4]);
        assert!(users(&[3]).is_subset(&a));
        assert!(a.is_superset(&users(&[1, 2])));
        assert!(!a.is_subset(&b));
        assert!(a.set_eq(&users(&[3, 2, 1])));
        assert!(!a.set_eq(&b));
    }

    #[test]
    fn equality_set_self_operations() {
        let a = users(&[1, 2]);
        assert_eq!(ids(&a.union(&a)), vec![1, 2]);
        assert!(a.symmetric_difference(&a).is_empty());
        assert!(a.set_eq(&a));
    }

    #[test]
    fn equality_set_clone_and_iteration() {
        let a = users(&[1, 2, 3]);
        let b = a.clone();
        b.clear();
        assert_eq!(a.len(), 3);
        assert!(b.is_empty());
        assert!(b.add(User { id: 7, name: "" }));
        assert_eq!(a.len(), 3);

        let mut visited = Vec::new();
        a.for_each_while(|u| {
            visited.push(u.id);
            u.id != 2
        });
        assert_eq!(visited, vec![1, 2]);
    }

    #[test]
    fn equality_set_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<EqualitySet<String>>();
    }
}
