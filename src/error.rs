//! Error types for the synckit library.
//!
//! Empty containers are not errors: `dequeue`, `pop` and `peek` return
//! `Option::None`. The only error type here reports broken internal
//! invariants.
//!
//! ## Example Usage
//!
//! ```
//! use synckit::ds::RingBuffer;
//!
//! let mut buf = RingBuffer::with_capacity(2);
//! buf.enqueue(1);
//! buf.enqueue(2);
//! buf.enqueue(3);
//! assert!(buf.check_invariants().is_ok());
//! ```

use std::fmt;

/// Error returned when a container's internal invariants are violated.
///
/// Produced by `check_invariants` methods (e.g.
/// [`RingBuffer::check_invariants`](crate::ds::RingBuffer::check_invariants)).
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("tail does not follow head by len");
        assert_eq!(err.to_string(), "tail does not follow head by len");
    }

    #[test]
    fn invariant_message_and_eq() {
        let err = InvariantError::new(format!("len {} exceeds capacity {}", 5, 4));
        assert_eq!(err.message(), "len 5 exceeds capacity 4");
        assert_eq!(err.clone(), err);
        assert!(format!("{:?}", err).contains("exceeds capacity"));
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<InvariantError>();
    }
}
