//! Cache Module
//!
//! Provides category-partitioned in-memory caching with TTL expiration,
//! invalidation and statistics.

mod category;
mod clock;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use category::{CategoryConfig, CategoryTable, FALLBACK_TTL};
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, MAX_TTL_SECS};
pub use stats::{CacheStats, StatsSnapshot};
pub use store::{CacheStore, SharedCache};
