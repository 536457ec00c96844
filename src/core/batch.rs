//! Batches of numbers handed from the producer to a single worker

use crate::core::error::{PrimeError, Result};
use crate::core::primality;

/// An immutable group of integers scored as one unit of work.
///
/// A batch is owned by exactly one holder at a time: the producer builds it,
/// the queue holds it, then one worker takes it and drops it after scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    numbers: Vec<i64>,
}

impl Batch {
    /// Number of integers in the batch
    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    /// Whether the batch holds no integers
    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    /// The integers in submission order
    pub fn numbers(&self) -> &[i64] {
        &self.numbers
    }

    /// Counts the primes in this batch.
    ///
    /// The count is local so the caller can publish it with one atomic add.
    pub fn count_primes(&self) -> u64 {
        primality::count_primes(&self.numbers)
    }

    /// Consumes the batch, returning its storage
    pub fn into_numbers(self) -> Vec<i64> {
        self.numbers
    }
}

impl From<Vec<i64>> for Batch {
    fn from(numbers: Vec<i64>) -> Self {
        Self { numbers }
    }
}

/// Accumulates integers until a batch is full.
#[derive(Debug)]
pub struct BatchBuilder {
    capacity: usize,
    numbers: Vec<i64>,
}

impl BatchBuilder {
    /// Create a builder for batches of `capacity` numbers.
    ///
    /// # Errors
    ///
    /// Returns [`PrimeError::Allocation`] if the storage cannot be reserved.
    pub fn new(capacity: usize) -> Result<Self> {
        Ok(Self {
            capacity,
            numbers: Self::allocate(capacity)?,
        })
    }

    fn allocate(capacity: usize) -> Result<Vec<i64>> {
        let mut numbers = Vec::new();
        numbers
            .try_reserve_exact(capacity)
            .map_err(|_| PrimeError::allocation(capacity))?;
        Ok(numbers)
    }

    /// Append a number. Returns the finished batch once `capacity` is reached.
    ///
    /// # Errors
    ///
    /// Returns [`PrimeError::Allocation`] if storage for the next batch
    /// cannot be reserved.
    pub fn push(&mut self, n: i64) -> Result<Option<Batch>> {
        self.numbers.push(n);
        if self.numbers.len() < self.capacity {
            return Ok(None);
        }
        let next = Self::allocate(self.capacity)?;
        Ok(Some(Batch::from(std::mem::replace(&mut self.numbers, next))))
    }

    /// Number of integers waiting in the partial batch
    pub fn pending(&self) -> usize {
        self.numbers.len()
    }

    /// Returns the final partial batch, if any numbers remain.
    pub fn finish(self) -> Option<Batch> {
        if self.numbers.is_empty() {
            None
        } else {
            Some(Batch::from(self.numbers))
        }
    }
}
