//! Reads whitespace-separated integers and feeds them to a pool in batches.

use crate::core::{BatchBuilder, Result};
use crate::pool::{PoolConfig, PrimePool, RunSummary};
use std::io::{self, BufRead};

// Longer than any `i64` in decimal, so a longer token is already malformed.
const MAX_TOKEN_LEN: usize = 64;

/// What the producer read before handing off to the pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProducerStats {
    /// Integers parsed from the input
    pub numbers_read: u64,
    /// Batches submitted, including a final partial batch
    pub batches_submitted: u64,
    /// The token that ended the input early, if any
    pub malformed_token: Option<String>,
}

/// Groups input integers into fixed-size batches for a running [`PrimePool`].
///
/// Tokens are runs of bytes between ASCII whitespace, read incrementally so
/// input without newlines is never buffered whole. Input ends at end-of-stream
/// or at the first token that is not an `i64`, including tokens that are not
/// UTF-8. Anything after a malformed token is ignored.
#[derive(Debug)]
pub struct Producer<R> {
    reader: R,
    batch_size: usize,
}

impl<R: BufRead> Producer<R> {
    /// Create a producer emitting batches of `batch_size` numbers
    pub fn new(reader: R, batch_size: usize) -> Self {
        Self { reader, batch_size }
    }

    /// Read the whole input, submitting each full batch as it fills and the
    /// partial remainder at the end.
    ///
    /// Does not stop the pool; the caller owns the shutdown.
    pub fn run(mut self, pool: &PrimePool) -> Result<ProducerStats> {
        let mut stats = ProducerStats::default();
        let mut builder = BatchBuilder::new(self.batch_size)?;
        let mut token = Vec::with_capacity(MAX_TOKEN_LEN);

        while self.next_token(&mut token)? {
            let Some(n) = parse_token(&token) else {
                let lossy = String::from_utf8_lossy(&token).into_owned();
                log::warn!("stopping input at malformed token {:?}", lossy);
                stats.malformed_token = Some(lossy);
                break;
            };
            stats.numbers_read += 1;
            if let Some(batch) = builder.push(n)? {
                pool.submit(batch)?;
                stats.batches_submitted += 1;
            }
        }

        if let Some(batch) = builder.finish() {
            pool.submit(batch)?;
            stats.batches_submitted += 1;
        }

        log::debug!(
            "producer read {} numbers into {} batches",
            stats.numbers_read,
            stats.batches_submitted
        );
        Ok(stats)
    }

    /// Read the next whitespace-delimited token into `token`.
    ///
    /// Returns `false` at end-of-stream with no token pending.
    fn next_token(&mut self, token: &mut Vec<u8>) -> io::Result<bool> {
        token.clear();
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if buf.is_empty() {
                return Ok(!token.is_empty());
            }

            let mut used = 0;
            let mut complete = false;
            for &byte in buf {
                used += 1;
                if is_separator(byte) {
                    if !token.is_empty() {
                        complete = true;
                        break;
                    }
                } else {
                    token.push(byte);
                    if token.len() > MAX_TOKEN_LEN {
                        complete = true;
                        break;
                    }
                }
            }
            self.reader.consume(used);

            if complete {
                return Ok(true);
            }
        }
    }
}

fn is_separator(byte: u8) -> bool {
    // Vertical tab counts as whitespace for C-style readers too.
    byte.is_ascii_whitespace() || byte == 0x0b
}

fn parse_token(token: &[u8]) -> Option<i64> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

/// Count the primes in `reader` with a pool built from `config`.
///
/// Starts the workers, feeds them the whole input, then runs the shutdown
/// protocol and returns the totals once every worker has exited.
///
/// # Example
///
/// ```rust
/// use prime_counter::prelude::*;
///
/// # fn main() -> Result<()> {
/// let input = "2 3 4 5 17 18\n";
/// let config = PoolConfig::new(2).with_batch_size(2);
/// let summary = count_primes_in(input.as_bytes(), config)?;
/// assert_eq!(summary.total_primes, 4);
/// # Ok(())
/// # }
/// ```
pub fn count_primes_in<R: BufRead>(reader: R, config: PoolConfig) -> Result<RunSummary> {
    let batch_size = config.batch_size;
    let pool = PrimePool::with_config(config)?;
    pool.start()?;

    feed_and_stop(&pool, Producer::new(reader, batch_size))
}

/// Drain the pool after a clean read; discard queued work after a failed one.
fn feed_and_stop<R: BufRead>(pool: &PrimePool, producer: Producer<R>) -> Result<RunSummary> {
    if let Err(e) = producer.run(pool) {
        log::error!("input failed, abandoning queued batches: {}", e);
        if let Err(abort_err) = pool.abort() {
            log::error!("abort after input failure also failed: {}", abort_err);
        }
        return Err(e);
    }
    pool.shutdown()
}
