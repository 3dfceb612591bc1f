//! Key hashing and the bucket size sequence.

/// Bucket counts a table steps through as it grows. Capacity starts at the
/// first entry and never goes past the last.
pub const BUCKET_COUNTS: [usize; 8] = [509, 1021, 2039, 4093, 8191, 16381, 32749, 65521];

pub const HASH_MULTIPLIER: u64 = 65599;

/// Polynomial hash over the key bytes, `h = h * 65599 + byte`, wrapping.
#[inline]
pub fn hash(key: &str) -> u64 {
    key.bytes().fold(0u64, |h, b| {
        h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(u64::from(b))
    })
}

/// Bucket that `key` lands in for a table with `bucket_count` buckets.
#[inline]
pub fn bucket_index(key: &str, bucket_count: usize) -> usize {
    debug_assert!(bucket_count > 0);
    (hash(key) % bucket_count as u64) as usize
}

/// Position of `bucket_count` in [`BUCKET_COUNTS`], if it is one of them.
pub(crate) fn size_class(bucket_count: usize) -> Option<usize> {
    BUCKET_COUNTS.iter().position(|&n| n == bucket_count)
}
