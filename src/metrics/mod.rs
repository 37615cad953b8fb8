//! Opt-in queue metrics (`metrics` feature).

pub mod cell;
pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;

pub use exporter::PrometheusTextExporter;
pub use metrics_impl::QueueMetrics;
pub use snapshot::QueueMetricsSnapshot;
pub use traits::{
    MetricsExporter, MetricsSnapshotProvider, QueueMetricsReadRecorder, QueueMetricsRecorder,
};
