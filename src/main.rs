use prime_counter::cli::{Cli, EXIT_FAILURE};
use prime_counter::count_primes_in;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse_or_exit();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let summary = match count_primes_in(io::stdin().lock(), cli.pool_config()) {
        Ok(summary) => summary,
        Err(e) => {
            eprintln!("prime_counter: {}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let mut stdout = io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{} total primes.", summary.total_primes) {
        eprintln!("prime_counter: failed to write result: {}", e);
        return ExitCode::from(EXIT_FAILURE);
    }
    ExitCode::SUCCESS
}
