//! Pool configuration

use crate::core::{PrimeError, Result};

/// Default number of worker threads
pub const DEFAULT_NUM_THREADS: usize = 8;

/// Default number of integers grouped into one batch
pub const DEFAULT_BATCH_SIZE: usize = 100_000;

/// Configuration for a [`PrimePool`](crate::pool::PrimePool)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of worker threads
    pub num_threads: usize,
    /// Integers per batch handed to a worker
    pub batch_size: usize,
    /// Thread name prefix
    pub thread_name_prefix: String,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_threads: DEFAULT_NUM_THREADS,
            batch_size: DEFAULT_BATCH_SIZE,
            thread_name_prefix: "prime-worker".to_string(),
        }
    }
}

impl PoolConfig {
    /// Create a configuration with the given number of threads
    #[must_use]
    pub fn new(num_threads: usize) -> Self {
        Self {
            num_threads,
            ..Default::default()
        }
    }

    /// Set the batch size
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Set thread name prefix
    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.num_threads == 0 {
            return Err(PrimeError::invalid_config(
                "num_threads",
                "Number of threads must be greater than 0",
            ));
        }
        if self.batch_size == 0 {
            return Err(PrimeError::invalid_config(
                "batch_size",
                "Batch size must be greater than 0",
            ));
        }
        Ok(())
    }
}
