//! CLI integration tests for the prime_counter binary.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run(args: &[&str], stdin: &str) -> Output {
    let bin = env!("CARGO_BIN_EXE_prime_counter");
    let mut child = Command::new(bin)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to run prime_counter binary");

    // The binary may exit before reading input (usage errors), closing the pipe.
    let _ = child
        .stdin
        .take()
        .expect("stdin not captured")
        .write_all(stdin.as_bytes());

    child.wait_with_output().expect("failed to wait for binary")
}

#[test]
fn reports_example_total() {
    let output = run(&["-t", "2", "-b", "2"], "2 3 4 5 17 18\n");

    assert!(
        output.status.success(),
        "binary exited with non-zero status: {:?}",
        output.status
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "4 total primes.\n");
}

#[test]
fn empty_input_reports_zero() {
    let output = run(&[], "");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "0 total primes.\n");
}

#[test]
fn default_flags_count_range() {
    let input: String = (1..=100).map(|n| format!("{}\n", n)).collect();
    let output = run(&[], &input);

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "25 total primes.\n");
}

#[test]
fn malformed_token_ends_input() {
    let output = run(&["-b", "1"], "2 3 x 5 7\n");

    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2 total primes.\n");
}

#[test]
fn unknown_flag_exits_with_usage() {
    let output = run(&["-q"], "2 3\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"), "usage missing from stderr: {}", stderr);
}

#[test]
fn zero_threads_is_an_error() {
    let output = run(&["-t", "0"], "2 3\n");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("num_threads"));
}
