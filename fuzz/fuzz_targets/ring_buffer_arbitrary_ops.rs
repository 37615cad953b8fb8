#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use synckit::ds::RingBuffer;

// Fuzz arbitrary operation sequences on RingBuffer
//
// Mirrors every operation on a VecDeque and checks that both agree on order,
// length and peek, and that capacity never shrinks.
fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks the starting capacity (0 is clamped to 1)
    let mut buf = RingBuffer::with_capacity(usize::from(data[0] % 16));
    let mut model = VecDeque::new();
    let mut last_capacity = buf.capacity();

    for (idx, &byte) in data[1..].iter().enumerate() {
        match byte % 5 {
            0 | 1 => {
                buf.enqueue(idx);
                model.push_back(idx);
            }
            2 => {
                assert_eq!(buf.dequeue(), model.pop_front());
            }
            3 => {
                assert_eq!(buf.peek(), model.front());
            }
            _ => {
                if byte % 64 == 4 {
                    buf.clear();
                    model.clear();
                } else {
                    assert!(buf.iter().eq(model.iter()));
                }
            }
        }

        assert_eq!(buf.len(), model.len());
        assert!(buf.capacity() >= last_capacity);
        last_capacity = buf.capacity();
        assert!(buf.check_invariants().is_ok());
    }
});
