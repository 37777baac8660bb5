//! An accounting [`Allocator`] for exercising queues: it counts every block that is granted and
//! released, and refuses requests on demand.
//!
//! ```
//! use text_queue::{tracking::Tracking, Queue};
//!
//! let tracking = Tracking::new();
//! let mut queue = Queue::new_in(&tracking);
//! queue.insert_back("a").unwrap();
//!
//! tracking.fail_next();
//! assert!(queue.insert_back("b").is_err());
//!
//! queue.destroy();
//! assert!(tracking.is_balanced());
//! ```

use std::cell::Cell;

use crate::calloc::{AllocError, Allocator, Block};

/// Counters kept by [`Tracking`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Stats {
    /// granted requests
    pub allocations: usize,
    /// released blocks
    pub releases: usize,
    /// refused requests
    pub failures: usize,
    pub live_blocks: usize,
    pub live_bytes: usize,
    pub live_nodes: usize,
    pub live_values: usize,
}

#[derive(Debug, Default)]
pub struct Tracking {
    stats: Cell<Stats>,
    /// requests to let through before refusing one
    countdown: Cell<Option<usize>>,
    deny_all: Cell<bool>,
    #[cfg(any(feature = "wasm", feature = "nowasm"))]
    failure_probability: Cell<f64>,
}

impl Tracking {
    pub fn new() -> Tracking {
        Tracking::default()
    }

    pub fn stats(&self) -> Stats {
        self.stats.get()
    }

    /// nothing granted is still outstanding
    pub fn is_balanced(&self) -> bool {
        let stats = self.stats.get();
        stats.live_blocks == 0 && stats.live_bytes == 0
    }

    /// Refuses the very next request.
    pub fn fail_next(&self) {
        self.fail_on(0);
    }

    /// Refuses the `nth` upcoming request (0-based) once, granting the ones before it.
    pub fn fail_on(&self, nth: usize) {
        self.countdown.set(Some(nth));
    }

    /// While `deny` is set, every request is refused.
    pub fn deny_all(&self, deny: bool) {
        self.deny_all.set(deny);
    }

    /// Refuses each request independently with the given probability (clamped to `[0, 1]`).
    #[cfg(any(feature = "wasm", feature = "nowasm"))]
    pub fn fail_with_probability(&self, probability: f64) {
        self.failure_probability.set(probability.clamp(0.0, 1.0));
    }

    fn should_refuse(&self) -> bool {
        let scheduled = match self.countdown.get() {
            Some(0) => {
                self.countdown.set(None);
                true
            }
            Some(n) => {
                self.countdown.set(Some(n - 1));
                false
            }
            None => false,
        };
        scheduled || self.deny_all.get() || self.random_refusal()
    }

    #[cfg(any(feature = "wasm", feature = "nowasm"))]
    fn random_refusal(&self) -> bool {
        let p = self.failure_probability.get();
        p > 0.0 && crate::wasm_safe::random_number_between_0_and_1() < p
    }

    #[cfg(not(any(feature = "wasm", feature = "nowasm")))]
    fn random_refusal(&self) -> bool {
        false
    }
}

impl Allocator for Tracking {
    fn allocate(&self, block: Block) -> Result<(), AllocError> {
        let mut stats = self.stats.get();
        if self.should_refuse() {
            stats.failures += 1;
            self.stats.set(stats);
            return Err(AllocError(block));
        }
        stats.allocations += 1;
        stats.live_blocks += 1;
        stats.live_bytes += block.bytes();
        match block {
            Block::Node => stats.live_nodes += 1,
            Block::Value { .. } => stats.live_values += 1,
            Block::Queue { .. } => {}
        }
        self.stats.set(stats);
        Ok(())
    }

    fn deallocate(&self, block: Block) {
        let mut stats = self.stats.get();
        debug_assert!(
            stats.live_blocks > 0 && stats.live_bytes >= block.bytes(),
            "released {block} that was never granted"
        );
        stats.releases += 1;
        stats.live_blocks -= 1;
        stats.live_bytes -= block.bytes();
        match block {
            Block::Node => stats.live_nodes -= 1,
            Block::Value { .. } => stats.live_values -= 1,
            Block::Queue { .. } => {}
        }
        self.stats.set(stats);
    }
}
