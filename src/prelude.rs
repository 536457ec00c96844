//! Convenient re-exports for common types and traits

pub use crate::core::{is_prime, Batch, PrimeError, Result};
pub use crate::pool::{PoolConfig, PoolState, PrimePool, RunSummary, WorkerStats};
pub use crate::producer::{count_primes_in, Producer, ProducerStats};
pub use crate::queue::TaskQueue;
