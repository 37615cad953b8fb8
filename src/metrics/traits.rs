//! # Metrics Trait Hierarchy
//!
//! Recording, snapshotting and export are split into small traits so queue
//! logic only ever *writes* counters.
//!
//! ```text
//!   ┌─────────────────────────────┐     ┌─────────────────────────────┐
//!   │    QueueMetricsRecorder     │     │  QueueMetricsReadRecorder   │
//!   │ enqueue/grow/dequeue/clear  │     │  peek (through &self)       │
//!   └──────────────┬──────────────┘     └──────────────┬──────────────┘
//!                  └───────────────┬───────────────────┘
//!                                  ▼
//!                           QueueMetrics
//!                                  │
//!            ┌─────────────────────┴─────────────────────┐
//!            ▼                                           ▼
//!   MetricsSnapshotProvider<S>                  MetricsExporter<S>
//!   (tests, benches)                            (production monitoring)
//! ```

/// Counters recorded by mutating queue operations.
pub trait QueueMetricsRecorder {
    fn record_enqueue(&mut self);
    fn record_grow(&mut self);
    fn record_dequeue_call(&mut self);
    fn record_dequeue_found(&mut self);
    fn record_dequeue_empty(&mut self);
    fn record_clear(&mut self);
}

/// Counters recorded by read-only queue operations (interior mutability).
pub trait QueueMetricsReadRecorder {
    fn record_peek_call(&self);
    fn record_peek_found(&self);
}

/// Produce a point-in-time snapshot of metrics.
pub trait MetricsSnapshotProvider<S> {
    fn snapshot(&self) -> S;
}

/// Publish a snapshot to a monitoring backend.
pub trait MetricsExporter<S> {
    fn export(&self, snapshot: &S);
}
