//! Worker pool, its configuration and the shared work context

pub mod config;
pub mod context;
pub mod prime_pool;
pub mod worker;

pub use config::{PoolConfig, DEFAULT_BATCH_SIZE, DEFAULT_NUM_THREADS};
pub use context::WorkContext;
pub use prime_pool::{PoolState, PrimePool, RunSummary};
pub use worker::{Worker, WorkerStats};
