//! Commonly used types.
//!
//! ```
//! use synckit::prelude::*;
//!
//! let mut buf = RingBuffer::new();
//! buf.enqueue(Optional::value(1));
//! buf.enqueue(Optional::null());
//! assert_eq!(buf.dequeue(), Some(Optional::Value(1)));
//! ```

pub use crate::ds::RingBuffer;
pub use crate::error::InvariantError;
#[cfg(feature = "concurrency")]
pub use crate::sync::{EqualitySet, RingQueue, Set, Stack};
pub use crate::value::{ExistenceClaim, Optional, Range, RangeBound};
