//! State shared by the producer side of a pool and its workers

use crate::core::{Batch, PrimeCounter, StopSignal};
use crate::queue::TaskQueue;

/// The queue, stop signal and counter of one pool.
///
/// Created once per pool and handed to each worker as an `Arc` at spawn
/// time, so independent pools never share state.
#[derive(Debug, Default)]
pub struct WorkContext {
    queue: TaskQueue,
    stop: StopSignal,
    counter: PrimeCounter,
}

impl WorkContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a batch for the workers
    pub fn submit(&self, batch: Batch) {
        self.queue.enqueue(batch);
    }

    /// Block until a batch is available. `None` means the work has ended.
    pub fn next_batch(&self) -> Option<Batch> {
        self.queue.dequeue_blocking(&self.stop)
    }

    /// Drop every queued batch, returning how many were discarded.
    pub fn discard_pending(&self) -> usize {
        let mut discarded = 0;
        while self.queue.try_dequeue().is_some() {
            discarded += 1;
        }
        discarded
    }

    /// Raise the stop signal and wake every idle worker.
    ///
    /// Returns `false` if the signal was already raised.
    pub fn raise_stop(&self) -> bool {
        let first = self.stop.raise();
        // Broadcast: every waiter must observe the signal, not just one.
        self.queue.wake_all();
        first
    }

    /// Whether the stop signal has been raised
    pub fn is_stopping(&self) -> bool {
        self.stop.is_raised()
    }

    /// Record primes found in one batch
    pub fn add_primes(&self, primes: u64) {
        self.counter.add(primes);
    }

    /// Primes counted so far
    pub fn total_primes(&self) -> u64 {
        self.counter.get()
    }

    /// Number of batches still queued
    pub fn pending_batches(&self) -> usize {
        self.queue.len()
    }
}
