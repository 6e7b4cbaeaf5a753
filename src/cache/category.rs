//! Category Configuration Module
//!
//! Static per-category settings: enable flag, default TTL and nominal size
//! budget. Categories are looked up by name case-insensitively.

use std::collections::BTreeMap;

use serde::Serialize;

// == Public Constants ==
/// TTL in seconds used when a category has no default of its own
pub const FALLBACK_TTL: u64 = 300;

// == Category Config ==
/// Settings for one cache category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryConfig {
    /// Display name, as declared
    pub name: String,
    /// When false, Get always misses and Set never stores
    pub enabled: bool,
    /// Default TTL in seconds; `None` falls back to [`FALLBACK_TTL`]
    pub default_ttl: Option<u64>,
    /// Nominal size budget. Exceeding it is logged, never enforced.
    pub max_entries: Option<usize>,
}

impl CategoryConfig {
    /// Creates an enabled category with the given default TTL.
    pub fn new(name: impl Into<String>, default_ttl: u64) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            default_ttl: Some(default_ttl),
            max_entries: None,
        }
    }

    /// Sets the enabled flag (builder pattern).
    #[must_use]
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the nominal size budget (builder pattern).
    #[must_use]
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// TTL applied by Set when no override is given.
    pub fn effective_ttl(&self) -> u64 {
        self.default_ttl.unwrap_or(FALLBACK_TTL)
    }
}

// == Category Table ==
/// The static set of known categories, keyed by uppercase name.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    categories: BTreeMap<String, CategoryConfig>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference configuration: seven enabled categories.
    pub fn reference() -> Self {
        [
            ("characters", 300),
            ("items", 30),
            ("pve", 600),
            ("collections", 1800),
            ("search", 60),
            ("professions", 3600),
            ("reputations", 300),
        ]
        .into_iter()
        .map(|(name, ttl)| CategoryConfig::new(name, ttl))
        .collect()
    }

    /// Adds or replaces a category.
    pub fn insert(&mut self, config: CategoryConfig) {
        self.categories.insert(normalize(&config.name), config);
    }

    /// Adds a category (builder pattern).
    #[must_use]
    pub fn with(mut self, config: CategoryConfig) -> Self {
        self.insert(config);
        self
    }

    /// Looks up a category by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&CategoryConfig> {
        self.categories.get(&normalize(name))
    }

    /// Mutable lookup by name, ignoring case.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut CategoryConfig> {
        self.categories.get_mut(&normalize(name))
    }

    /// Iterates over `(uppercase key, config)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &CategoryConfig)> {
        self.categories.iter()
    }

    /// Number of configured categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if no category is configured.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl FromIterator<CategoryConfig> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = CategoryConfig>>(iter: I) -> Self {
        let mut table = Self::new();
        for config in iter {
            table.insert(config);
        }
        table
    }
}

/// Canonical table key for a category name.
pub fn normalize(name: &str) -> String {
    name.to_ascii_uppercase()
}
