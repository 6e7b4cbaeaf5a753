//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

// == Public Constants ==
/// Largest TTL in seconds whose millisecond form fits in a `u64`
pub const MAX_TTL_SECS: u64 = u64::MAX / 1000;

// == Cache Entry ==
/// Represents a single cache entry with value and metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored payload
    pub value: V,
    /// Creation timestamp (Unix milliseconds)
    pub created_at: u64,
    /// Time-to-live in seconds
    pub ttl: u64,
    /// Number of successful reads of this entry
    pub hit_count: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a fresh entry stamped at `now_ms`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - TTL in seconds
    /// * `now_ms` - Creation time in Unix milliseconds
    pub fn new(value: V, ttl: u64, now_ms: u64) -> Self {
        debug_assert!(
            ttl <= MAX_TTL_SECS,
            "TTL of {} seconds overflows millisecond arithmetic",
            ttl
        );

        Self {
            value,
            created_at: now_ms,
            ttl,
            hit_count: 0,
        }
    }

    // == Age ==
    /// Milliseconds elapsed since creation. A clock reading earlier than
    /// `created_at` counts as zero age.
    pub fn age_ms(&self, now_ms: u64) -> u64 {
        now_ms.saturating_sub(self.created_at)
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now_ms`.
    ///
    /// An entry is live while `now - created_at <= ttl`, so it is still
    /// readable at exactly its TTL and expired one millisecond after.
    pub fn is_expired(&self, now_ms: u64) -> bool {
        self.age_ms(now_ms) > self.ttl_ms()
    }

    fn ttl_ms(&self) -> u64 {
        self.ttl.saturating_mul(1000)
    }
}
