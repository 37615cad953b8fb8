//! Lock-guarded containers.
//!
//! Each container owns exactly one `parking_lot` lock and holds it for the
//! duration of every call. Nothing returned from these types aliases their
//! internal storage.

pub mod equality_set;
pub mod lock_order;
pub mod queue;
pub mod set;
pub mod stack;

pub use equality_set::{EqualityFn, EqualitySet};
pub use lock_order::InstanceId;
pub use queue::RingQueue;
pub use set::Set;
pub use stack::Stack;
