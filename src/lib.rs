//! synckit: lock-guarded containers and small filter value types.
//!
//! - [`ds`]: unsynchronized building blocks ([`RingBuffer`]).
//! - `sync` (`concurrency` feature, on by default): thread-safe wrappers
//!   (`RingQueue`, `Stack`, `Set`, `EqualitySet`).
//! - [`value`]: plain values with a serde contract ([`Optional`], [`Range`],
//!   [`ExistenceClaim`]).
//! - `metrics` (`metrics` feature): queue counters and a Prometheus text
//!   exporter.

pub mod ds;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod prelude;
#[cfg(feature = "concurrency")]
pub mod sync;
pub mod value;

pub use crate::ds::RingBuffer;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::QueueMetricsSnapshot;
#[cfg(feature = "concurrency")]
pub use crate::sync::{EqualitySet, RingQueue, Set, Stack};
pub use crate::value::{ExistenceClaim, Optional, Range, RangeBound};
