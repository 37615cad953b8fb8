//! Deadlock-free read locking of two containers.
//!
//! Binary set operations (`union`, `is_subset`, ...) need both operands'
//! read locks at once. Locking in argument order deadlocks when one thread
//! runs `a.union(&b)` while another runs `b.union(&a)` and a writer is queued
//! on either lock (`parking_lot` read locks are writer-fair). Every container
//! therefore carries a process-unique [`InstanceId`], and pairs are always
//! locked in ascending id order. A container paired with itself is locked
//! once.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::{RwLock, RwLockReadGuard};

static NEXT_INSTANCE_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique, monotonically assigned container identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InstanceId(u64);

impl InstanceId {
    pub(crate) fn next() -> Self {
        Self(NEXT_INSTANCE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Read guards for a `(left, right)` operand pair.
pub(crate) enum PairReadGuard<'a, A> {
    Same(RwLockReadGuard<'a, A>),
    Distinct {
        left: RwLockReadGuard<'a, A>,
        right: RwLockReadGuard<'a, A>,
    },
}

impl<A> PairReadGuard<'_, A> {
    /// Returns `(left, right)` views; both point at the same data for `Same`.
    pub(crate) fn sides(&self) -> (&A, &A) {
        match self {
            PairReadGuard::Same(guard) => (&**guard, &**guard),
            PairReadGuard::Distinct { left, right } => (&**left, &**right),
        }
    }
}

/// Acquires read locks on both operands in ascending [`InstanceId`] order.
pub(crate) fn read_pair<'a, A>(
    left: (&'a RwLock<A>, InstanceId),
    right: (&'a RwLock<A>, InstanceId),
) -> PairReadGuard<'a, A> {
    let (left_lock, left_id) = left;
    let (right_lock, right_id) = right;

    if left_id == right_id {
        return PairReadGuard::Same(left_lock.read());
    }

    if left_id < right_id {
        let left = left_lock.read();
        let right = right_lock.read();
        PairReadGuard::Distinct { left, right }
    } else {
        let right = right_lock.read();
        let left = left_lock.read();
        PairReadGuard::Distinct { left, right }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instance_ids_are_unique_and_increasing() {
        let a = InstanceId::next();
        let b = InstanceId::next();
        assert!(a < b);
        assert_ne!(a.get(), b.get());
    }

    #[test]
    fn read_pair_same_instance_locks_once() {
        let lock = RwLock::new(vec![1, 2]);
        let id = InstanceId::next();
        let guard = read_pair((&lock, id), (&lock, id));
        assert!(matches!(guard, PairReadGuard::Same(_)));
        let (l, r) = guard.sides();
        assert_eq!(l, r);
    }

    #[test]
    fn read_pair_keeps_argument_sides() {
        let a = RwLock::new("a");
        let b = RwLock::new("b");
        let a_id = InstanceId::next();
        let b_id = InstanceId::next();

        let guard = read_pair((&b, b_id), (&a, a_id));
        assert_eq!(guard.sides(), (&"b", &"a"));
        drop(guard);

        let guard = read_pair((&a, a_id), (&b, b_id));
        assert_eq!(guard.sides(), (&"a", &"b"));
    }
}
