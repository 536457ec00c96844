//! Command-line interface definitions using clap.

use crate::pool::{PoolConfig, DEFAULT_BATCH_SIZE, DEFAULT_NUM_THREADS};
use clap::error::ErrorKind;
use clap::Parser;
use std::ffi::OsString;

/// Exit status for usage errors and failed runs
pub const EXIT_FAILURE: u8 = 1;

/// Count the primes in whitespace-separated integers read from standard input.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "prime_counter")]
#[command(about, long_about = None)]
pub struct Cli {
    /// Number of worker threads.
    #[arg(short = 't', value_name = "NUM_THREADS", default_value_t = DEFAULT_NUM_THREADS)]
    pub num_threads: usize,

    /// Integers grouped into each batch.
    #[arg(short = 'b', value_name = "BATCH_SIZE", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: usize,
}

impl Cli {
    /// Parse arguments, printing usage to stderr and exiting with status 1 on
    /// any unknown flag or bad value. `--help` exits with status 0.
    pub fn parse_or_exit() -> Self {
        match Self::try_parse_from_args(std::env::args_os()) {
            Ok(cli) => cli,
            Err(e) if e.kind() == ErrorKind::DisplayHelp => e.exit(),
            Err(e) => {
                let _ = e.print();
                std::process::exit(i32::from(EXIT_FAILURE));
            }
        }
    }

    /// Parse from an explicit argument list
    pub fn try_parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Pool configuration for these arguments
    pub fn pool_config(&self) -> PoolConfig {
        PoolConfig::new(self.num_threads).with_batch_size(self.batch_size)
    }
}
