//! # Prime Counter
//!
//! Counts the primes in a stream of integers with a fixed pool of worker
//! threads fed by a single producer through a blocking batch queue.
//!
//! ## Features
//!
//! - **Task Queue**: Unbounded FIFO of batches built on parking_lot's mutex and condition variable
//! - **Worker Pool**: Fixed-size pool, each worker scores whole batches and publishes one count per batch
//! - **Graceful Shutdown**: Stop signal plus broadcast; workers drain the queue before exiting
//! - **Worker Statistics**: Batches, numbers and primes per worker
//!
//! ## Quick Start
//!
//! ```rust
//! use prime_counter::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let pool = PrimePool::with_threads(4)?;
//! pool.start()?;
//!
//! for chunk in (0..1_000i64).collect::<Vec<_>>().chunks(100) {
//!     pool.submit(Batch::from(chunk.to_vec()))?;
//! }
//!
//! // Drain the queue and join every worker
//! let summary = pool.shutdown()?;
//! assert_eq!(summary.total_primes, 168);
//! # Ok(())
//! # }
//! ```
//!
//! ## Reading a Stream
//!
//! ```rust
//! use prime_counter::prelude::*;
//!
//! # fn main() -> Result<()> {
//! let config = PoolConfig::new(2).with_batch_size(2);
//! let summary = count_primes_in("2 3 4 5 17 18".as_bytes(), config)?;
//! println!("{} total primes.", summary.total_primes);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod core;
pub mod pool;
pub mod prelude;
pub mod producer;
pub mod queue;

pub use core::{Batch, PrimeError, Result};
pub use pool::{PoolConfig, PrimePool, RunSummary};
pub use producer::{count_primes_in, Producer};
