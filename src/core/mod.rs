//! Core types: batches, the primality test, shared signals and errors

pub mod batch;
pub mod error;
pub mod primality;
pub mod signal;

pub use batch::{Batch, BatchBuilder};
pub use error::{PrimeError, Result};
pub use primality::{count_primes, is_prime};
pub use signal::{PrimeCounter, StopSignal};
