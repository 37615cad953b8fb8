//! DHAT heap profiler for synckit.
//!
//! Run with: cargo run --bin dhat_profile --release --features dhat-heap
//! View results: Open dhat-heap.json in <https://nnethercote.github.io/dh_view/dh_view.html>

#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::sync::Arc;

use synckit::ds::RingBuffer;
use synckit::sync::{RingQueue, Set, Stack};

/// Simple XorShift64 RNG for deterministic workloads.
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }
}

/// Enqueue-heavy mix: roughly two enqueues per dequeue, so the buffer keeps
/// growing through wrapped states.
fn mixed_workload(buf: &mut RingBuffer<Arc<u64>>, operations: usize, seed: u64) {
    let mut rng = XorShift64::new(seed);
    for i in 0..operations {
        if rng.next_u64() % 3 == 0 {
            let _ = buf.dequeue();
        } else {
            buf.enqueue(Arc::new(i as u64));
        }
    }
}

fn profile_ring_buffer_growth() {
    println!("=== Profiling RingBuffer growth ===");
    let operations = 200_000;

    let mut buf = RingBuffer::new();
    mixed_workload(&mut buf, operations, 42);
    println!("  Peak capacity: {}", buf.capacity());

    // Drain; capacity must stay put while slots are released.
    while buf.dequeue().is_some() {}
    println!("  After drain: len={} capacity={}", buf.len(), buf.capacity());
}

fn profile_ring_queue_steady_state() {
    println!("=== Profiling RingQueue steady state ===");
    let queue = RingQueue::with_capacity(1024);

    for round in 0..100u64 {
        for i in 0..1000 {
            queue.enqueue(round * 1000 + i);
        }
        let drained = queue.drain_all();
        debug_assert_eq!(drained.len(), 1000);
    }

    println!("  Final capacity: {}", queue.capacity());
}

fn profile_stack_and_set() {
    println!("=== Profiling Stack / Set ===");
    let mut rng = XorShift64::new(7);
    let stack = Stack::new();
    let set = Set::new();

    for _ in 0..100_000 {
        let v = rng.next_u64() % 16_384;
        stack.push(v);
        set.add(v);
        if v % 4 == 0 {
            let _ = stack.pop();
            set.remove(&v);
        }
    }

    println!("  Stack len: {}, set len: {}", stack.len(), set.len());
}

fn main() {
    let _profiler = dhat::Profiler::new_heap();

    println!("synckit DHAT Heap Profiling");
    println!("===========================\n");

    profile_ring_buffer_growth();
    profile_ring_queue_steady_state();
    profile_stack_and_set();

    println!("\n===========================");
    println!("Profile written to dhat-heap.json");
}
