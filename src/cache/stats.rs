//! Cache Statistics Module
//!
//! Tracks process-wide cache counters and builds read-only snapshots.

use std::collections::BTreeMap;

use serde::Serialize;

// == Cache Stats ==
/// Cumulative cache counters. They only grow until an explicit reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Gets that found a live entry
    pub hits: u64,
    /// Gets on an enabled category that found nothing live
    pub misses: u64,
    /// Entries removed by Invalidate or ClearAll
    pub invalidations: u64,
    /// Entries removed by the periodic sweep
    pub memory_evictions: u64,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Percentage of requests that hit, or 0.0 if no requests have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64 * 100.0
        }
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Invalidations ==
    /// Adds `count` caller-driven removals.
    pub fn record_invalidations(&mut self, count: u64) {
        self.invalidations += count;
    }

    // == Record Sweep Evictions ==
    /// Adds `count` sweep-driven expirations.
    pub fn record_memory_evictions(&mut self, count: u64) {
        self.memory_evictions += count;
    }

    // == Reset ==
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // == Snapshot ==
    /// Freezes the counters together with per-category entry counts.
    pub fn snapshot(&self, entries: BTreeMap<String, usize>) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits,
            misses: self.misses,
            hit_rate: self.hit_rate(),
            invalidations: self.invalidations,
            memory_evictions: self.memory_evictions,
            total_entries: entries.values().sum(),
            entries,
        }
    }
}

// == Stats Snapshot ==
/// Read-only view of the statistics at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsSnapshot {
    pub hits: u64,
    pub misses: u64,
    /// Hit percentage in `[0, 100]`
    pub hit_rate: f64,
    pub invalidations: u64,
    pub memory_evictions: u64,
    /// Current entry count per category name
    pub entries: BTreeMap<String, usize>,
    /// Sum of `entries`
    pub total_entries: usize,
}
