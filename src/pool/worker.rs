//! Worker thread implementation

use crate::core::{Batch, PrimeError, Result};
use crate::pool::context::WorkContext;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;

#[cfg(feature = "tracing")]
use tracing::{span, Level};

/// Statistics for a worker thread
#[derive(Debug, Default)]
pub struct WorkerStats {
    /// Total number of batches scored
    pub batches_processed: AtomicU64,
    /// Total number of integers tested
    pub numbers_scanned: AtomicU64,
    /// Total number of primes found
    pub primes_found: AtomicU64,
}

impl WorkerStats {
    /// Create new worker statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one scored batch
    pub fn record_batch(&self, numbers: u64, primes: u64) {
        self.batches_processed.fetch_add(1, Ordering::Relaxed);
        self.numbers_scanned.fetch_add(numbers, Ordering::Relaxed);
        self.primes_found.fetch_add(primes, Ordering::Relaxed);
    }

    /// Get total batches processed
    pub fn get_batches_processed(&self) -> u64 {
        self.batches_processed.load(Ordering::Relaxed)
    }

    /// Get total integers tested
    pub fn get_numbers_scanned(&self) -> u64 {
        self.numbers_scanned.load(Ordering::Relaxed)
    }

    /// Get total primes found
    pub fn get_primes_found(&self) -> u64 {
        self.primes_found.load(Ordering::Relaxed)
    }
}

/// A worker thread that scores batches from a [`WorkContext`]
#[derive(Debug)]
pub struct Worker {
    id: usize,
    thread: Option<thread::JoinHandle<()>>,
    stats: Arc<WorkerStats>,
}

impl Worker {
    /// Spawn a worker thread named `{prefix}-{id}`.
    ///
    /// # Shutdown Behavior
    ///
    /// The worker exits only when the context's stop signal is raised and
    /// its queue is empty, so every queued batch is scored first.
    pub fn new(id: usize, prefix: &str, context: Arc<WorkContext>) -> Result<Self> {
        let stats = Arc::new(WorkerStats::new());
        let stats_clone = Arc::clone(&stats);

        let thread = thread::Builder::new()
            .name(format!("{}-{}", prefix, id))
            .spawn(move || {
                Self::run(id, &context, &stats_clone);
            })
            .map_err(|e| PrimeError::spawn_with_source(id, e.to_string(), e))?;

        Ok(Self {
            id,
            thread: Some(thread),
            stats,
        })
    }

    /// Get worker ID
    pub fn id(&self) -> usize {
        self.id
    }

    /// Get worker statistics
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Join the worker thread
    pub fn join(mut self) -> Result<()> {
        if let Some(thread) = self.thread.take() {
            thread
                .join()
                .map_err(|_| PrimeError::join(self.id, "Worker panicked"))?;
        }
        Ok(())
    }

    fn run(id: usize, context: &WorkContext, stats: &WorkerStats) {
        #[cfg(feature = "tracing")]
        let worker_span = span!(Level::DEBUG, "worker", id = id);
        #[cfg(feature = "tracing")]
        let _guard = worker_span.enter();

        log::debug!("worker {} started", id);

        while let Some(batch) = context.next_batch() {
            Self::score(id, batch, context, stats);
        }

        log::debug!(
            "worker {} stopped after {} batches ({} primes)",
            id,
            stats.get_batches_processed(),
            stats.get_primes_found()
        );
    }

    /// Count primes in one batch locally, then publish with a single add.
    fn score(id: usize, batch: Batch, context: &WorkContext, stats: &WorkerStats) {
        let primes = batch.count_primes();
        context.add_primes(primes);
        stats.record_batch(batch.len() as u64, primes);
        log::trace!("worker {} scored {} numbers, {} primes", id, batch.len(), primes);
    }
}
