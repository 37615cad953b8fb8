pub mod ring_buffer;

pub use ring_buffer::{DEFAULT_CAPACITY, IntoIter, Iter, RingBuffer};
