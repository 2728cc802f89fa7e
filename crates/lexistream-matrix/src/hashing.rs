//! Hashing sketch: Jenkins one-at-a-time hash into a fixed number of bins

/// Prefix of the synthetic feature names used in hashing mode
pub const BIN_PREFIX: &str = "bin_";

/// Jenkins one-at-a-time hash over raw bytes
pub fn one_at_a_time(bytes: &[u8]) -> u32 {
    let mut hash: u32 = 0;
    for &byte in bytes {
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Bin for `word`: `abs(hash) mod bins`, with the hash read as a signed 32-bit value.
///
/// Always in `[0, bins)`; `bins` of zero is treated as one.
pub fn bin_for(word: &str, bins: usize) -> usize {
    let signed = one_at_a_time(word.as_bytes()) as i32;
    let bins = bins.max(1) as u64;
    (i64::from(signed).unsigned_abs() % bins) as usize
}

/// Synthetic feature name of a bin
pub fn bin_name(bin: usize) -> String {
    format!("{BIN_PREFIX}{bin}")
}
