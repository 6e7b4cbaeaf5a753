//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's accounting and expiry rules over
//! arbitrary operation sequences.

use proptest::prelude::*;
use std::sync::Arc;

use serde_json::Value;

use crate::cache::{CacheStore, CategoryConfig, CategoryTable, ManualClock};

// == Test Configuration ==
const TEST_TTL: u64 = 10;

fn test_table() -> CategoryTable {
    CategoryTable::new()
        .with(CategoryConfig::new("items", TEST_TTL))
        .with(CategoryConfig::new("search", TEST_TTL * 2))
        .with(CategoryConfig::new("archive", TEST_TTL).enabled(false))
}

fn test_store() -> (CacheStore<String>, ManualClock) {
    let clock = ManualClock::new(0);
    let store = CacheStore::with_clock(test_table(), Arc::new(clock.clone()));
    (store, clock)
}

// == Strategies ==
/// Known, disabled and unknown category names
fn category_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["items", "search", "archive", "mounts"]).prop_map(String::from)
}

/// Small key space so operations collide
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-d]".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,32}".prop_map(|s| s)
}

/// Generates a sequence of cache operations for testing
#[derive(Debug, Clone)]
enum CacheOp {
    Set { category: String, key: String, value: String },
    Get { category: String, key: String },
    Invalidate { category: String, key: Option<String> },
    ClearAll,
    Advance { secs: u64 },
    Sweep,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        3 => (category_strategy(), key_strategy(), value_strategy())
            .prop_map(|(category, key, value)| CacheOp::Set { category, key, value }),
        3 => (category_strategy(), key_strategy())
            .prop_map(|(category, key)| CacheOp::Get { category, key }),
        1 => (category_strategy(), prop::option::of(key_strategy()))
            .prop_map(|(category, key)| CacheOp::Invalidate { category, key }),
        1 => Just(CacheOp::ClearAll),
        2 => (0u64..15).prop_map(|secs| CacheOp::Advance { secs }),
        1 => Just(CacheOp::Sweep),
    ]
}

fn is_enabled_name(category: &str) -> bool {
    matches!(category, "items" | "search")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Every counter in the snapshot matches what the operations reported.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (mut store, clock) = test_store();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;
        let mut expected_invalidations: u64 = 0;
        let mut expected_sweeps: u64 = 0;

        for op in ops {
            match op {
                CacheOp::Set { category, key, value } => {
                    store.set(&category, key, value, None);
                }
                CacheOp::Get { category, key } => {
                    match store.get(&category, &key) {
                        Some(_) => expected_hits += 1,
                        None if is_enabled_name(&category) => expected_misses += 1,
                        None => {}
                    }
                }
                CacheOp::Invalidate { category, key } => {
                    expected_invalidations += store.invalidate(&category, key.as_deref()) as u64;
                }
                CacheOp::ClearAll => {
                    expected_invalidations += store.clear_all() as u64;
                }
                CacheOp::Advance { secs } => clock.advance_secs(secs),
                CacheOp::Sweep => {
                    expected_sweeps += store.sweep_expired() as u64;
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.invalidations, expected_invalidations, "Invalidations mismatch");
        prop_assert_eq!(stats.memory_evictions, expected_sweeps, "Sweep count mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "Total entries mismatch");
        prop_assert!(stats.hit_rate >= 0.0 && stats.hit_rate <= 100.0);
    }

    // Disabled and unknown categories never hold entries.
    #[test]
    fn prop_inert_categories_stay_empty(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let (mut store, clock) = test_store();

        for op in ops {
            match op {
                CacheOp::Set { category, key, value } => store.set(&category, key, value, None),
                CacheOp::Get { category, key } => {
                    let found = store.get(&category, &key);
                    if !is_enabled_name(&category) {
                        prop_assert!(found.is_none());
                    }
                }
                CacheOp::Invalidate { category, key } => {
                    store.invalidate(&category, key.as_deref());
                }
                CacheOp::ClearAll => {
                    store.clear_all();
                }
                CacheOp::Advance { secs } => clock.advance_secs(secs),
                CacheOp::Sweep => {
                    store.sweep_expired();
                }
            }
        }

        prop_assert_eq!(store.category_len("archive"), 0);
        prop_assert_eq!(store.category_len("mounts"), 0);
    }

    // Writing to one category is invisible to another.
    #[test]
    fn prop_category_isolation(key in key_strategy(), value in value_strategy()) {
        let (mut store, _) = test_store();

        store.set("items", key.clone(), value.clone(), None);

        prop_assert!(store.get("search", &key).is_none());
        prop_assert_eq!(store.get("items", &key), Some(value));
    }

    // A value is readable up to and including its TTL and gone afterwards.
    #[test]
    fn prop_ttl_expiry(
        ttl in 0u64..3600,
        value in value_strategy(),
        before_ms in 0u64..1_000,
    ) {
        let (mut store, clock) = test_store();
        store.set("items", "k", value.clone(), Some(ttl));

        clock.set_ms((ttl * 1000).saturating_sub(before_ms));
        prop_assert_eq!(store.get("items", "k"), Some(value));

        clock.set_ms(ttl * 1000 + 1);
        prop_assert_eq!(store.get("items", "k"), None);
    }

    // A second Set restarts the entry's lifetime and replaces its value.
    #[test]
    fn prop_overwrite_resets_age(
        ttl in 1u64..3600,
        value1 in value_strategy(),
        value2 in value_strategy(),
    ) {
        let (mut store, clock) = test_store();

        store.set("items", "k", value1, Some(ttl));
        clock.set_ms((ttl - 1) * 1000);
        store.set("items", "k", value2.clone(), Some(ttl));
        clock.set_ms((ttl + 1) * 1000);

        prop_assert_eq!(store.get("items", "k"), Some(value2));
        prop_assert_eq!(store.len(), 1);
    }

    // Category-wide invalidation counts every removed entry.
    #[test]
    fn prop_invalidate_category_counts_each_entry(
        keys in prop::collection::hash_set("[a-z]{1,8}", 0..30)
    ) {
        let (mut store, _) = test_store();
        for key in &keys {
            store.set("search", key.clone(), "v".to_string(), None);
        }
        store.set("items", "untouched", "v".to_string(), None);

        let removed = store.invalidate("search", None);

        prop_assert_eq!(removed, keys.len());
        prop_assert_eq!(store.stats().invalidations, keys.len() as u64);
        prop_assert_eq!(store.category_len("items"), 1);
    }

    // The sweep removes exactly the expired entries, read or not.
    #[test]
    fn prop_sweep_removes_only_expired(
        short_keys in prop::collection::hash_set("[a-z]{1,8}", 0..20),
        long_keys in prop::collection::hash_set("[A-Z]{1,8}", 0..20),
    ) {
        let (mut store, clock) = test_store();
        for key in &short_keys {
            store.set("items", key.clone(), "v".to_string(), Some(5));
        }
        for key in &long_keys {
            store.set("items", key.clone(), "v".to_string(), Some(50));
        }

        clock.advance_secs(6);
        let removed = store.sweep_expired();

        prop_assert_eq!(removed, short_keys.len());
        prop_assert_eq!(store.category_len("items"), long_keys.len());
        prop_assert_eq!(store.stats().invalidations, 0);
    }
}

// == Property Test for Error Response Format ==
// This tests the CacheError -> HTTP response conversion

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Every error renders as a JSON body with a string "error" field.
    #[test]
    fn prop_error_response_format(
        error_msg in "[a-zA-Z0-9 _-]{1,100}"
    ) {
        use crate::error::CacheError;
        use axum::body::to_bytes;
        use axum::response::IntoResponse;

        let error_variants = vec![
            CacheError::NotFound(error_msg.clone()),
            CacheError::UnknownCategory(error_msg.clone()),
            CacheError::InvalidRequest(error_msg.clone()),
        ];

        for error in error_variants {
            let expected_msg = error.to_string();
            let response = error.into_response();

            let content_type = response.headers()
                .get("content-type")
                .and_then(|v| v.to_str().ok());
            prop_assert!(
                content_type.map(|ct| ct.contains("application/json")).unwrap_or(false),
                "Response should have JSON content-type"
            );

            let bytes = tokio_test::block_on(to_bytes(response.into_body(), usize::MAX)).unwrap();
            let json: Value = serde_json::from_slice(&bytes)
                .expect("Response body should be valid JSON");

            prop_assert_eq!(json["error"].as_str(), Some(expected_msg.as_str()));
        }
    }
}

// == Property Test for Concurrent Operation Correctness ==
// Tasks share the store through SharedCache

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    // Interleaved tasks never lose a counter update.
    #[test]
    fn prop_concurrent_accounting(
        operations in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        let (store, clock) = test_store();
        let shared = store.into_shared();

        let expected_requests = operations
            .iter()
            .filter(|op| matches!(op, CacheOp::Get { category, .. } if is_enabled_name(category)))
            .count() as u64;

        let result: Result<(), TestCaseError> = tokio_test::block_on(async {
            let mut handles = vec![];

            for op in operations {
                let cache = Arc::clone(&shared);
                let clock = clock.clone();

                handles.push(tokio::spawn(async move {
                    let mut cache = cache.write().await;
                    match op {
                        CacheOp::Set { category, key, value } => cache.set(&category, key, value, None),
                        CacheOp::Get { category, key } => {
                            cache.get(&category, &key);
                        }
                        CacheOp::Invalidate { category, key } => {
                            cache.invalidate(&category, key.as_deref());
                        }
                        CacheOp::ClearAll => {
                            cache.clear_all();
                        }
                        CacheOp::Advance { secs } => clock.advance_secs(secs),
                        CacheOp::Sweep => {
                            cache.sweep_expired();
                        }
                    }
                }));
            }

            for handle in handles {
                handle.await.expect("Task should not panic");
            }

            let cache = shared.read().await;
            let stats = cache.stats();
            prop_assert_eq!(stats.hits + stats.misses, expected_requests);
            prop_assert_eq!(stats.total_entries, cache.len());
            Ok(())
        });
        result?;
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_strategy_categories_cover_all_kinds() {
        let table = test_table();
        let names: HashSet<&str> = ["items", "search", "archive", "mounts"].into_iter().collect();

        assert!(names.iter().any(|n| table.get(n).is_some_and(|c| c.enabled)));
        assert!(names.iter().any(|n| table.get(n).is_some_and(|c| !c.enabled)));
        assert!(names.iter().any(|n| table.get(n).is_none()));
    }

    #[test]
    fn test_error_status_codes() {
        use crate::error::CacheError;
        use axum::http::StatusCode;
        use axum::response::IntoResponse;

        let test_cases = vec![
            (CacheError::NotFound("key".to_string()), StatusCode::NOT_FOUND),
            (CacheError::UnknownCategory("mounts".to_string()), StatusCode::NOT_FOUND),
            (CacheError::InvalidRequest("bad".to_string()), StatusCode::BAD_REQUEST),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should map to correct HTTP status"
            );
        }
    }
}
