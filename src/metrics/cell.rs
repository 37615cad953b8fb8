use std::cell::Cell;

/// A counter that can be bumped through `&self`.
///
/// Used for counters recorded by read-only operations (`peek`). The cell is
/// `Send` but not `Sync`; concurrent containers keep it behind their lock.
#[repr(transparent)]
#[derive(Debug, Default)]
pub struct MetricsCell(Cell<u64>);

impl MetricsCell {
    #[inline]
    pub fn new() -> Self {
        Self(Cell::new(0))
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    #[inline]
    pub fn incr(&self) {
        self.0.set(self.0.get() + 1);
    }

    #[inline]
    pub fn reset(&self) {
        self.0.set(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_cell_counts_and_resets() {
        let cell = MetricsCell::new();
        cell.incr();
        cell.incr();
        assert_eq!(cell.get(), 2);
        cell.reset();
        assert_eq!(cell.get(), 0);
    }
}
