//! 64-bit string hash and multiply-add combinator.
//!
//! The string hash is pinned to FNV-1a-64 so identifiers derived from it stay
//! reproducible across platforms, toolchains and process restarts. Do not swap
//! it for `std::hash`, whose output is unspecified between releases.

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0100_0000_01b3;

/// Hash a string with FNV-1a-64.
///
/// `None` and the empty string both hash to `0`.
pub fn hash(value: Option<&str>) -> u64 {
    match value {
        None => 0,
        Some(s) if s.is_empty() => 0,
        Some(s) => fnv1a(s.as_bytes()),
    }
}

fn fnv1a(data: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for &byte in data {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Fold a single string into the accumulator: `seed * multiplier + hash(value)`.
///
/// Arithmetic wraps on overflow.
pub fn combine(seed: u64, multiplier: u64, value: Option<&str>) -> u64 {
    seed.wrapping_mul(multiplier).wrapping_add(hash(value))
}

/// Fold an ordered sequence of strings into the accumulator.
///
/// A missing or empty sequence is folded as a single `None`. Otherwise every
/// element is folded in order, so permuting the sequence changes the result.
pub fn combine_all<S: AsRef<str>>(seed: u64, multiplier: u64, values: Option<&[S]>) -> u64 {
    match values {
        Some(values) if !values.is_empty() => values
            .iter()
            .fold(seed, |acc, v| combine(acc, multiplier, Some(v.as_ref()))),
        _ => combine(seed, multiplier, None),
    }
}
