//! Category Cache - a category-partitioned in-memory TTL cache
//!
//! Provides per-category TTL expiration, explicit invalidation, hit/miss
//! statistics and a periodic expiry sweep, with an HTTP diagnostics surface.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{CacheStore, CategoryConfig, CategoryTable, SharedCache, StatsSnapshot};
pub use config::Config;
pub use tasks::spawn_sweep_task;
