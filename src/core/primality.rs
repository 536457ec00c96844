//! Trial-division primality test

/// Returns `true` if `n` is prime.
///
/// Multiples of 2 and 3 are eliminated first, then candidates of the
/// form `6k ± 1` are tried up to `√n`.
///
/// # Example
///
/// ```rust
/// use prime_counter::core::is_prime;
///
/// assert!(is_prime(17));
/// assert!(!is_prime(18));
/// assert!(!is_prime(-7));
/// ```
pub fn is_prime(n: i64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    // `i <= n / i` instead of `i * i <= n` so values near i64::MAX cannot overflow.
    let mut i: i64 = 5;
    while i <= n / i {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Single-threaded reference scan: counts the primes in `numbers`.
pub fn count_primes(numbers: &[i64]) -> u64 {
    numbers.iter().filter(|&&n| is_prime(n)).count() as u64
}
