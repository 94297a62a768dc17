//! Rough effort estimates for Base58 prefixes.

/// Characters that can appear in a Base58 encoded address.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// True iff every character of `prefix` can occur in a Base58 address.
///
/// A prefix containing `0`, `O`, `I` or `l` will never match.
pub fn is_base58(prefix: &str) -> bool {
    prefix.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// Expected attempts to hit `prefix`: 58^n, where n is the prefix length.
///
/// Ignores the uneven distribution of the first character after the version
/// byte, so it is an order-of-magnitude figure.
pub fn estimated_attempts(prefix: &str) -> u64 {
    58u64.saturating_pow(prefix.chars().count() as u32)
}

/// Returns a human-readable difficulty estimate.
pub fn difficulty_description(attempts: u64) -> &'static str {
    match attempts {
        0..=1_000 => "Very Easy (< 1 second)",
        1_001..=1_000_000 => "Easy (seconds)",
        1_000_001..=100_000_000 => "Medium (minutes)",
        100_000_001..=100_000_000_000 => "Hard (hours to days)",
        _ => "Very Hard (weeks or more)",
    }
}
