//! Prime-counting worker pool and its shutdown protocol

use crate::core::{Batch, PrimeError, Result};
use crate::pool::config::PoolConfig;
use crate::pool::context::WorkContext;
use crate::pool::worker::{Worker, WorkerStats};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

/// Lifecycle of a [`PrimePool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum PoolState {
    /// Created, workers not yet spawned
    Idle = 0,
    /// Accepting batches; idle workers block on the queue
    Running = 1,
    /// Stop signal raised; workers finish the queued batches
    Draining = 2,
    /// Every worker has been joined
    Stopped = 3,
}

impl PoolState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => PoolState::Idle,
            1 => PoolState::Running,
            2 => PoolState::Draining,
            _ => PoolState::Stopped,
        }
    }
}

/// Totals of a finished run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Primes found across all batches
    pub total_primes: u64,
    /// Batches submitted to the pool
    pub batches: u64,
    /// Integers submitted to the pool
    pub numbers: u64,
    /// Size of the worker pool
    pub workers: usize,
}

/// A fixed-size pool of workers counting primes in submitted batches.
///
/// # Shutdown Mechanism
///
/// [`shutdown`](Self::shutdown) raises the stop signal and broadcasts to every
/// blocked worker. Workers keep scoring until the queue is empty, then exit.
/// The total is read only after every worker has been joined.
///
/// A pool runs once: the stop signal never resets, so a stopped pool cannot
/// be started again.
///
/// # Example
///
/// ```rust
/// use prime_counter::prelude::*;
///
/// # fn main() -> Result<()> {
/// let pool = PrimePool::with_config(PoolConfig::new(2).with_batch_size(2))?;
/// pool.start()?;
///
/// pool.submit(Batch::from(vec![2, 3]))?;
/// pool.submit(Batch::from(vec![4, 5]))?;
/// pool.submit(Batch::from(vec![17, 18]))?;
///
/// let summary = pool.shutdown()?;
/// assert_eq!(summary.total_primes, 4);
/// # Ok(())
/// # }
/// ```
pub struct PrimePool {
    config: PoolConfig,
    context: Arc<WorkContext>,
    workers: RwLock<Vec<Worker>>,
    stats: RwLock<Vec<Arc<WorkerStats>>>,
    // Serializes shutdown so only the caller that joins the workers reads the total.
    join_lock: Mutex<()>,
    state: AtomicU8,
    batches_submitted: AtomicU64,
    numbers_submitted: AtomicU64,
}

impl std::fmt::Debug for PrimePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrimePool")
            .field("config", &self.config)
            .field("state", &self.state())
            .field(
                "batches_submitted",
                &self.batches_submitted.load(Ordering::Relaxed),
            )
            .finish()
    }
}

impl PrimePool {
    /// Create a pool with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(PoolConfig::default())
    }

    /// Create a pool with the specified number of threads
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        Self::with_config(PoolConfig::new(num_threads))
    }

    /// Create a pool with custom configuration
    pub fn with_config(config: PoolConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            context: Arc::new(WorkContext::new()),
            workers: RwLock::new(Vec::new()),
            stats: RwLock::new(Vec::new()),
            join_lock: Mutex::new(()),
            state: AtomicU8::new(PoolState::Idle as u8),
            batches_submitted: AtomicU64::new(0),
            numbers_submitted: AtomicU64::new(0),
        })
    }

    /// Spawn the workers.
    ///
    /// If any worker fails to spawn, the ones already running are stopped and
    /// joined and the pool ends in [`PoolState::Stopped`].
    pub fn start(&self) -> Result<()> {
        // Held while spawning so a concurrent shutdown waits for every worker.
        let mut guard = self.workers.write();
        if self
            .state
            .compare_exchange(
                PoolState::Idle as u8,
                PoolState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return Err(PrimeError::already_running(
                &self.config.thread_name_prefix,
                self.config.num_threads,
            ));
        }

        let mut workers = Vec::with_capacity(self.config.num_threads);
        for id in 0..self.config.num_threads {
            match Worker::new(
                id,
                &self.config.thread_name_prefix,
                Arc::clone(&self.context),
            ) {
                Ok(worker) => workers.push(worker),
                Err(e) => {
                    log::error!("aborting pool start: {}", e);
                    self.set_state(PoolState::Draining);
                    self.context.raise_stop();
                    for worker in workers {
                        if let Err(join_err) = worker.join() {
                            log::error!("{}", join_err);
                        }
                    }
                    self.set_state(PoolState::Stopped);
                    return Err(e);
                }
            }
        }

        *self.stats.write() = workers.iter().map(Worker::stats).collect();
        *guard = workers;
        drop(guard);

        log::info!(
            "prime pool '{}' started: {} workers, batch size {}",
            self.config.thread_name_prefix,
            self.config.num_threads,
            self.config.batch_size
        );
        Ok(())
    }

    /// Queue a batch for scoring.
    ///
    /// # Errors
    ///
    /// - `PrimeError::NotRunning` - Pool has not been started
    /// - `PrimeError::ShuttingDown` - Stop signal already raised
    pub fn submit(&self, batch: Batch) -> Result<()> {
        // Shutdown changes state under the write lock, so no batch can slip
        // into the queue after the stop signal.
        let _workers = self.workers.read();
        match self.state() {
            PoolState::Running => {}
            PoolState::Idle => {
                return Err(PrimeError::not_running(&self.config.thread_name_prefix))
            }
            PoolState::Draining | PoolState::Stopped => {
                return Err(PrimeError::shutting_down(self.context.pending_batches()))
            }
        }

        self.numbers_submitted
            .fetch_add(batch.len() as u64, Ordering::Relaxed);
        self.batches_submitted.fetch_add(1, Ordering::Relaxed);
        self.context.submit(batch);
        Ok(())
    }

    /// Get the configuration
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Current lifecycle state
    pub fn state(&self) -> PoolState {
        PoolState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Check if the pool is accepting batches
    pub fn is_running(&self) -> bool {
        self.state() == PoolState::Running
    }

    /// Number of batches waiting in the queue
    pub fn queue_len(&self) -> usize {
        self.context.pending_batches()
    }

    /// Primes counted so far. Exact once [`shutdown`](Self::shutdown) returns.
    pub fn total_primes(&self) -> u64 {
        self.context.total_primes()
    }

    /// Get statistics for all workers
    pub fn worker_stats(&self) -> Vec<Arc<WorkerStats>> {
        self.stats.read().clone()
    }

    /// Totals so far
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            total_primes: self.context.total_primes(),
            batches: self.batches_submitted.load(Ordering::Relaxed),
            numbers: self.numbers_submitted.load(Ordering::Relaxed),
            workers: self.config.num_threads,
        }
    }

    /// Stop accepting batches, drain the queue and join every worker.
    ///
    /// # Graceful Shutdown
    ///
    /// 1. Moves to [`PoolState::Draining`] so no new batch is accepted
    /// 2. Raises the stop signal and wakes every blocked worker
    /// 3. Joins all workers after they have emptied the queue
    ///
    /// Concurrent callers block until the workers are joined. Calling
    /// `shutdown` again returns the same summary.
    pub fn shutdown(&self) -> Result<RunSummary> {
        self.stop_and_join(false).map(|(summary, _)| summary)
    }

    /// Stop the pool without scoring the batches still queued.
    ///
    /// Batches already taken by a worker are finished; the rest are dropped.
    /// Returns the summary of the work actually scored and the number of
    /// batches discarded.
    pub fn abort(&self) -> Result<(RunSummary, usize)> {
        self.stop_and_join(true)
    }

    fn stop_and_join(&self, discard_queued: bool) -> Result<(RunSummary, usize)> {
        let _join = self.join_lock.lock();

        let mut discarded = 0;
        let workers = {
            let mut guard = self.workers.write();
            if self.state() == PoolState::Stopped {
                return Ok((self.summary(), 0));
            }
            self.set_state(PoolState::Draining);
            if discard_queued {
                discarded = self.context.discard_pending();
                log::warn!("discarded {} queued batches", discarded);
            }
            self.context.raise_stop();
            std::mem::take(&mut *guard)
        };

        log::debug!(
            "draining {} queued batches with {} workers",
            self.context.pending_batches(),
            workers.len()
        );

        // Join every worker even if one fails, reporting the first failure.
        let mut first_error = None;
        for worker in workers {
            if let Err(e) = worker.join() {
                log::error!("{}", e);
                first_error.get_or_insert(e);
            }
        }
        self.set_state(PoolState::Stopped);

        if let Some(e) = first_error {
            return Err(e);
        }

        let summary = self.summary();
        log::info!(
            "prime pool '{}' stopped: {} primes in {} numbers ({} batches)",
            self.config.thread_name_prefix,
            summary.total_primes,
            summary.numbers,
            summary.batches
        );
        Ok((summary, discarded))
    }

    fn set_state(&self, state: PoolState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

impl Drop for PrimePool {
    fn drop(&mut self) {
        if matches!(self.state(), PoolState::Running | PoolState::Draining) {
            if let Err(e) = self.shutdown() {
                log::error!(
                    "Failed to shutdown prime pool '{}' during drop: {}",
                    self.config.thread_name_prefix,
                    e
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_creation() {
        let pool = PrimePool::new().expect("Failed to create pool");
        assert_eq!(pool.state(), PoolState::Idle);
        assert!(!pool.is_running());

        pool.start().expect("Failed to start pool");
        assert!(pool.is_running());
        assert_eq!(pool.worker_stats().len(), 8);

        pool.shutdown().expect("Failed to shutdown pool");
        assert_eq!(pool.state(), PoolState::Stopped);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = PrimePool::with_threads(0);
        assert!(matches!(result, Err(PrimeError::InvalidConfig { .. })));
    }

    #[test]
    fn test_example_input() {
        let pool = PrimePool::with_config(PoolConfig::new(2).with_batch_size(2))
            .expect("Failed to create pool");
        pool.start().expect("Failed to start pool");

        for pair in [[2, 3], [4, 5], [17, 18]] {
            pool.submit(Batch::from(pair.to_vec()))
                .expect("Failed to submit batch");
        }

        let summary = pool.shutdown().expect("Failed to shutdown pool");
        assert_eq!(
            summary,
            RunSummary {
                total_primes: 4,
                batches: 3,
                numbers: 6,
                workers: 2,
            }
        );
    }

    #[test]
    fn test_submit_when_not_running() {
        let pool = PrimePool::with_threads(1).expect("Failed to create pool");
        let result = pool.submit(Batch::from(vec![2]));
        assert!(matches!(result, Err(PrimeError::NotRunning { .. })));
    }

    #[test]
    fn test_submit_after_shutdown() {
        let pool = PrimePool::with_threads(1).expect("Failed to create pool");
        pool.start().expect("Failed to start pool");
        pool.shutdown().expect("Failed to shutdown pool");

        let result = pool.submit(Batch::from(vec![2]));
        assert!(matches!(result, Err(PrimeError::ShuttingDown { .. })));
    }

    #[test]
    fn test_start_twice() {
        let pool = PrimePool::with_threads(2).expect("Failed to create pool");
        pool.start().expect("Failed to start pool");
        let result = pool.start();
        assert!(matches!(result, Err(PrimeError::AlreadyRunning { .. })));
        pool.shutdown().expect("Failed to shutdown pool");

        // The stop signal never resets.
        assert!(pool.start().is_err());
    }

    #[test]
    fn test_shutdown_is_idempotent() {
        let pool = PrimePool::with_threads(2).expect("Failed to create pool");
        pool.start().expect("Failed to start pool");
        pool.submit(Batch::from(vec![7, 11, 13]))
            .expect("Failed to submit batch");

        let first = pool.shutdown().expect("Failed to shutdown pool");
        let second = pool.shutdown().expect("Second shutdown failed");
        assert_eq!(first, second);
        assert_eq!(first.total_primes, 3);
    }

    #[test]
    fn test_shutdown_without_start() {
        let pool = PrimePool::with_threads(2).expect("Failed to create pool");
        let summary = pool.shutdown().expect("Failed to shutdown pool");
        assert_eq!(summary.total_primes, 0);
        assert_eq!(pool.state(), PoolState::Stopped);
    }

    #[test]
    fn test_worker_stats_sum_to_total() {
        let pool = PrimePool::with_config(PoolConfig::new(4).with_batch_size(10))
            .expect("Failed to create pool");
        pool.start().expect("Failed to start pool");

        let numbers: Vec<i64> = (0..1_000).collect();
        for chunk in numbers.chunks(10) {
            pool.submit(Batch::from(chunk.to_vec()))
                .expect("Failed to submit batch");
        }
        let summary = pool.shutdown().expect("Failed to shutdown pool");

        let stats = pool.worker_stats();
        let batches: u64 = stats.iter().map(|s| s.get_batches_processed()).sum();
        let scanned: u64 = stats.iter().map(|s| s.get_numbers_scanned()).sum();
        let primes: u64 = stats.iter().map(|s| s.get_primes_found()).sum();

        assert_eq!(batches, 100);
        assert_eq!(scanned, 1_000);
        assert_eq!(primes, summary.total_primes);
        assert_eq!(summary.total_primes, 168);
    }

    #[test]
    fn test_abort_discards_queued_batches() {
        let pool = PrimePool::with_config(PoolConfig::new(1).with_batch_size(20))
            .expect("Failed to create pool");
        pool.start().expect("Failed to start pool");

        for _ in 0..2_000 {
            pool.submit(Batch::from(vec![1_000_000_007; 20]))
                .expect("Failed to submit batch");
        }

        let (summary, discarded) = pool.abort().expect("Failed to abort pool");
        assert_eq!(pool.state(), PoolState::Stopped);
        assert_eq!(pool.queue_len(), 0);
        assert!(discarded > 0, "single worker cannot drain 2000 batches instantly");
        // Every batch is either scored whole by the worker or discarded.
        assert_eq!(summary.total_primes, (2_000 - discarded as u64) * 20);

        // A later shutdown reports the same totals without rescoring.
        assert_eq!(pool.shutdown().expect("Failed to shutdown pool"), summary);
    }

    #[test]
    fn test_drop_drains_queue() {
        let pool = PrimePool::with_threads(2).expect("Failed to create pool");
        pool.start().expect("Failed to start pool");
        pool.submit(Batch::from(vec![2, 3, 5]))
            .expect("Failed to submit batch");
        drop(pool);
    }
}
