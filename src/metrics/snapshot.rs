/// Point-in-time copy of a queue's counters plus gauges.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct QueueMetricsSnapshot {
    pub enqueue_calls: u64,
    pub grow_events: u64,
    pub dequeue_calls: u64,
    pub dequeue_found: u64,
    pub dequeue_empty: u64,
    pub peek_calls: u64,
    pub peek_found: u64,
    pub clear_calls: u64,

    // gauges captured at snapshot time
    pub len: usize,
    pub capacity: usize,
}
