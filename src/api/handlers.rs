//! API Handlers
//!
//! HTTP request handlers for each diagnostics endpoint.

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::{CacheStore, CategoryConfig, SharedCache, StatsSnapshot};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    validate_key, validate_ttl, CategoryResponse, GetResponse, HealthResponse,
    InvalidateResponse, SetRequest, SetResponse, ToggleRequest,
};

/// Application state shared across all handlers.
///
/// Holds the same shared store the sweep task works on.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store of JSON payloads
    pub cache: SharedCache<Value>,
}

impl AppState {
    /// Creates a new AppState around the given cache store.
    pub fn new(cache: CacheStore<Value>) -> Self {
        Self {
            cache: cache.into_shared(),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(CacheStore::new(config.categories.clone()))
    }
}

fn ensure_known(cache: &CacheStore<Value>, category: &str) -> Result<()> {
    match cache.categories().get(category) {
        Some(_) => Ok(()),
        None => Err(CacheError::UnknownCategory(category.to_string())),
    }
}

fn ensure_valid_key(key: &str) -> Result<()> {
    match validate_key(key) {
        Some(error_msg) => Err(CacheError::InvalidRequest(error_msg)),
        None => Ok(()),
    }
}

fn category_response(cache: &CacheStore<Value>, config: &CategoryConfig) -> CategoryResponse {
    CategoryResponse {
        name: config.name.clone(),
        enabled: config.enabled,
        default_ttl: config.effective_ttl(),
        max_entries: config.max_entries,
        entries: cache.category_len(&config.name),
    }
}

/// Handler for PUT /cache/:category/:key
///
/// Stores a value. A disabled category accepts the request but drops the
/// value, reported as `stored: false`.
pub async fn set_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    ensure_valid_key(&key)?;
    if let Some(error_msg) = validate_ttl(req.ttl) {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    let mut cache = state.cache.write().await;
    ensure_known(&cache, &category)?;

    let stored = cache.is_enabled(&category);
    cache.set(&category, key.clone(), req.value, req.ttl);

    Ok(Json(SetResponse::new(category, key, stored)))
}

/// Handler for GET /cache/:category/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<GetResponse>> {
    // Write lock: a read may delete an expired entry and updates counters
    let mut cache = state.cache.write().await;
    ensure_known(&cache, &category)?;

    match cache.get(&category, &key) {
        Some(value) => Ok(Json(GetResponse::new(category, key, value))),
        None => Err(CacheError::NotFound(format!("{}/{}", category, key))),
    }
}

/// Handler for DELETE /cache/:category/:key
pub async fn invalidate_key_handler(
    State(state): State<AppState>,
    Path((category, key)): Path<(String, String)>,
) -> Result<Json<InvalidateResponse>> {
    let mut cache = state.cache.write().await;
    ensure_known(&cache, &category)?;

    let removed = cache.invalidate(&category, Some(&key));

    Ok(Json(InvalidateResponse::new(Some(category), Some(key), removed)))
}

/// Handler for DELETE /cache/:category
pub async fn invalidate_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<InvalidateResponse>> {
    let mut cache = state.cache.write().await;
    ensure_known(&cache, &category)?;

    let removed = cache.invalidate(&category, None);

    Ok(Json(InvalidateResponse::new(Some(category), None, removed)))
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    let removed = state.cache.write().await.clear_all();
    Json(InvalidateResponse::new(None, None, removed))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let cache = state.cache.read().await;
    Json(cache.stats())
}

/// Handler for POST /stats/reset
///
/// Returns the zeroed snapshot.
pub async fn reset_stats_handler(State(state): State<AppState>) -> Json<StatsSnapshot> {
    let mut cache = state.cache.write().await;
    cache.reset_stats();
    Json(cache.stats())
}

/// Handler for GET /categories
pub async fn categories_handler(State(state): State<AppState>) -> Json<Vec<CategoryResponse>> {
    let cache = state.cache.read().await;
    let rows = cache
        .categories()
        .iter()
        .map(|(_, config)| category_response(&cache, config))
        .collect();
    Json(rows)
}

/// Handler for PUT /categories/:category/enabled
pub async fn toggle_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<CategoryResponse>> {
    let mut cache = state.cache.write().await;
    if !cache.set_category_enabled(&category, req.enabled) {
        return Err(CacheError::UnknownCategory(category));
    }

    let config = cache
        .categories()
        .get(&category)
        .ok_or_else(|| CacheError::UnknownCategory(category.clone()))?;
    Ok(Json(category_response(&cache, config)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
