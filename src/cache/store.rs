//! Cache Store Module
//!
//! Main cache engine: per-category key/value maps with TTL expiration,
//! invalidation and hit/miss accounting.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, trace, warn};

use crate::cache::category::normalize;
use crate::cache::{CacheEntry, CacheStats, CategoryTable, Clock, StatsSnapshot, SystemClock};

/// Cache store shared between the sweep task and its callers.
pub type SharedCache<V> = Arc<RwLock<CacheStore<V>>>;

type Bucket<V> = HashMap<String, CacheEntry<V>>;

// == Cache Store ==
/// Category-partitioned cache storage with TTL support.
///
/// Operations never fail: unknown categories, absent keys and expired entries
/// all resolve to a miss or a no-op.
#[derive(Debug)]
pub struct CacheStore<V> {
    /// Static category configuration
    categories: CategoryTable,
    /// Entry maps keyed by uppercase category name, created on first Set
    buckets: HashMap<String, Bucket<V>>,
    /// Performance statistics
    stats: CacheStats,
    /// Time source for entry ages
    clock: Arc<dyn Clock>,
}

impl<V> CacheStore<V> {
    // == Constructor ==
    /// Creates a store over `categories` using wall-clock time.
    pub fn new(categories: CategoryTable) -> Self {
        Self::with_clock(categories, Arc::new(SystemClock))
    }

    /// Creates a store over `categories` reading time from `clock`.
    pub fn with_clock(categories: CategoryTable, clock: Arc<dyn Clock>) -> Self {
        Self {
            categories,
            buckets: HashMap::new(),
            stats: CacheStats::new(),
            clock,
        }
    }

    /// Wraps the store for sharing with the sweep task.
    pub fn into_shared(self) -> SharedCache<V> {
        Arc::new(RwLock::new(self))
    }

    // == Set ==
    /// Stores a value, fully replacing any existing entry for the key.
    ///
    /// Unknown or disabled categories are silently ignored. Overwriting resets
    /// the entry's age and hit count.
    ///
    /// # Arguments
    /// * `category` - Category name (case-insensitive)
    /// * `key` - The key to store
    /// * `value` - The payload
    /// * `ttl` - Optional TTL in seconds (uses the category default if None)
    pub fn set(&mut self, category: &str, key: impl Into<String>, value: V, ttl: Option<u64>) {
        let Some(config) = self.categories.get(category).filter(|c| c.enabled) else {
            trace!(category, "Set ignored for unknown or disabled category");
            return;
        };

        let ttl = ttl.unwrap_or_else(|| config.effective_ttl());
        let entry = CacheEntry::new(value, ttl, self.clock.now_ms());

        self.buckets
            .entry(normalize(category))
            .or_default()
            .insert(key.into(), entry);
    }

    // == Get ==
    /// Retrieves a live value.
    ///
    /// An expired entry is removed on the spot and counted as a miss. Unknown
    /// or disabled categories return `None` without touching the statistics.
    pub fn get(&mut self, category: &str, key: &str) -> Option<V>
    where
        V: Clone,
    {
        if !self.is_enabled(category) {
            return None;
        }

        let now = self.clock.now_ms();
        let Some(bucket) = self.buckets.get_mut(&normalize(category)) else {
            self.stats.record_miss();
            return None;
        };

        match bucket.get_mut(key) {
            Some(entry) if entry.is_expired(now) => {
                bucket.remove(key);
                self.stats.record_miss();
                trace!(category, key, "Expired entry removed on read");
                None
            }
            Some(entry) => {
                entry.hit_count += 1;
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Invalidate ==
    /// Removes one key, or every key in the category when `key` is `None`.
    ///
    /// Each removed entry counts as one invalidation. Returns the number of
    /// entries removed.
    pub fn invalidate(&mut self, category: &str, key: Option<&str>) -> usize {
        let Some(bucket) = self.buckets.get_mut(&normalize(category)) else {
            return 0;
        };

        let removed = match key {
            Some(key) => usize::from(bucket.remove(key).is_some()),
            None => {
                let count = bucket.len();
                bucket.clear();
                count
            }
        };

        if removed > 0 {
            self.stats.record_invalidations(removed as u64);
            debug!(category, ?key, removed, "Invalidated cache entries");
        }
        removed
    }

    // == Clear All ==
    /// Invalidates every category. Statistics are kept; the removals are added
    /// to the invalidation counter.
    pub fn clear_all(&mut self) -> usize {
        let removed: usize = self
            .buckets
            .values_mut()
            .map(|bucket| {
                let count = bucket.len();
                bucket.clear();
                count
            })
            .sum();

        self.stats.record_invalidations(removed as u64);
        info!(removed, "Cleared all cache categories");
        removed
    }

    // == Sweep Expired ==
    /// Removes all expired entries from every category.
    ///
    /// Returns the number of entries removed; they are counted as memory
    /// evictions, not invalidations.
    pub fn sweep_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        let mut removed = 0;

        for (slot, bucket) in self.buckets.iter_mut() {
            let before = bucket.len();
            bucket.retain(|_, entry| !entry.is_expired(now));
            removed += before - bucket.len();

            if let Some(budget) = self.categories.get(slot).and_then(|c| c.max_entries) {
                if bucket.len() > budget {
                    warn!(
                        category = %slot,
                        entries = bucket.len(),
                        budget,
                        "Cache category is over its size budget"
                    );
                }
            }
        }

        self.stats.record_memory_evictions(removed as u64);
        removed
    }

    // == Stats ==
    /// Returns a snapshot of the counters and current per-category sizes.
    pub fn stats(&self) -> StatsSnapshot {
        let entries: BTreeMap<String, usize> = self
            .categories
            .iter()
            .map(|(slot, config)| {
                let count = self.buckets.get(slot).map_or(0, HashMap::len);
                (config.name.clone(), count)
            })
            .collect();

        self.stats.snapshot(entries)
    }

    // == Reset Stats ==
    /// Zeroes all counters. Entries are untouched.
    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    // == Category Controls ==
    /// Returns true if the category is known and enabled.
    pub fn is_enabled(&self, category: &str) -> bool {
        self.categories.get(category).is_some_and(|c| c.enabled)
    }

    /// Turns a category on or off at runtime. Existing entries are kept but
    /// unreadable while disabled. Returns false for an unknown category.
    pub fn set_category_enabled(&mut self, category: &str, enabled: bool) -> bool {
        match self.categories.get_mut(category) {
            Some(config) => {
                config.enabled = enabled;
                info!(category, enabled, "Cache category toggled");
                true
            }
            None => false,
        }
    }

    /// The category configuration in use.
    pub fn categories(&self) -> &CategoryTable {
        &self.categories
    }

    // == Length ==
    /// Number of entries held in one category, expired or not.
    pub fn category_len(&self, category: &str) -> usize {
        self.buckets
            .get(&normalize(category))
            .map_or(0, HashMap::len)
    }

    /// Returns the current number of entries across all categories.
    pub fn len(&self) -> usize {
        self.buckets.values().map(HashMap::len).sum()
    }

    // == Is Empty ==
    /// Returns true if no category holds an entry.
    pub fn is_empty(&self) -> bool {
        self.buckets.values().all(HashMap::is_empty)
    }
}
