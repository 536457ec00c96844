//! Lock-free shared state: the stop flag and the prime accumulator

use crossbeam_utils::CachePadded;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// One-way flag raised by the producer once every batch has been submitted.
///
/// The transition `false -> true` never reverses.
#[derive(Debug, Default)]
pub struct StopSignal {
    raised: AtomicBool,
}

impl StopSignal {
    /// Create a lowered signal
    pub fn new() -> Self {
        Self::default()
    }

    /// Raise the signal. Returns `false` if it was already raised.
    pub fn raise(&self) -> bool {
        !self.raised.swap(true, Ordering::AcqRel)
    }

    /// Whether the signal has been raised
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }
}

/// Running total of primes found by all workers.
///
/// Workers add one local count per batch. The total is exact only after
/// every worker has been joined.
#[derive(Debug, Default)]
pub struct PrimeCounter {
    total: CachePadded<AtomicU64>,
}

impl PrimeCounter {
    /// Create a counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the primes found in one batch
    pub fn add(&self, primes: u64) {
        // Addition commutes, so relaxed is enough; the join barrier publishes the total.
        self.total.fetch_add(primes, Ordering::Relaxed);
    }

    /// Current total
    pub fn get(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
