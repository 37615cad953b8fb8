use crate::metrics::cell::MetricsCell;
use crate::metrics::traits::{QueueMetricsReadRecorder, QueueMetricsRecorder};

/// Live counters owned by a [`RingBuffer`](crate::ds::RingBuffer).
#[derive(Debug, Default)]
pub struct QueueMetrics {
    pub enqueue_calls: u64,
    pub grow_events: u64,
    pub dequeue_calls: u64,
    pub dequeue_found: u64,
    pub dequeue_empty: u64,
    pub clear_calls: u64,
    pub peek_calls: MetricsCell,
    pub peek_found: MetricsCell,
}

impl QueueMetricsRecorder for QueueMetrics {
    fn record_enqueue(&mut self) {
        self.enqueue_calls += 1;
    }
    fn record_grow(&mut self) {
        self.grow_events += 1;
    }
    fn record_dequeue_call(&mut self) {
        self.dequeue_calls += 1;
    }
    fn record_dequeue_found(&mut self) {
        self.dequeue_found += 1;
    }
    fn record_dequeue_empty(&mut self) {
        self.dequeue_empty += 1;
    }
    fn record_clear(&mut self) {
        self.clear_calls += 1;
    }
}

impl QueueMetricsReadRecorder for QueueMetrics {
    fn record_peek_call(&self) {
        self.peek_calls.incr();
    }
    fn record_peek_found(&self) {
        self.peek_found.incr();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_bumps_matching_counters() {
        let mut m = QueueMetrics::default();
        m.record_enqueue();
        m.record_enqueue();
        m.record_grow();
        m.record_dequeue_call();
        m.record_dequeue_found();
        m.record_dequeue_call();
        m.record_dequeue_empty();
        m.record_clear();
        m.record_peek_call();

        assert_eq!(m.enqueue_calls, 2);
        assert_eq!(m.grow_events, 1);
        assert_eq!(m.dequeue_calls, 2);
        assert_eq!(m.dequeue_found, 1);
        assert_eq!(m.dequeue_empty, 1);
        assert_eq!(m.clear_calls, 1);
        assert_eq!(m.peek_calls.get(), 1);
        assert_eq!(m.peek_found.get(), 0);
    }
}
