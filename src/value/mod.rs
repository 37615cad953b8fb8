//! Lock-free value types with a serde contract.

pub mod existence;
pub mod optional;
pub mod range;

pub use existence::ExistenceClaim;
pub use optional::Optional;
pub use range::{Range, RangeBound};
