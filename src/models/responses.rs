//! Response DTOs for the diagnostics API
//!
//! Defines the structure of outgoing HTTP response bodies. Statistics are
//! served directly as [`crate::cache::StatsSnapshot`].

use serde::Serialize;
use serde_json::Value;

/// Response body for GET /cache/:category/:key
#[derive(Debug, Clone, Serialize)]
pub struct GetResponse {
    pub category: String,
    pub key: String,
    /// The stored value
    pub value: Value,
}

impl GetResponse {
    /// Creates a new GetResponse
    pub fn new(category: impl Into<String>, key: impl Into<String>, value: Value) -> Self {
        Self {
            category: category.into(),
            key: key.into(),
            value,
        }
    }
}

/// Response body for PUT /cache/:category/:key
#[derive(Debug, Clone, Serialize)]
pub struct SetResponse {
    pub message: String,
    pub category: String,
    pub key: String,
    /// False when the category is disabled and the value was dropped
    pub stored: bool,
}

impl SetResponse {
    /// Creates a new SetResponse
    pub fn new(category: impl Into<String>, key: impl Into<String>, stored: bool) -> Self {
        let category = category.into();
        let key = key.into();
        let message = if stored {
            format!("Key '{}' set in '{}'", key, category)
        } else {
            format!("Category '{}' is disabled; key '{}' not stored", category, key)
        };
        Self {
            message,
            category,
            key,
            stored,
        }
    }
}

/// Response body for the invalidation endpoints (DELETE /cache/...)
#[derive(Debug, Clone, Serialize)]
pub struct InvalidateResponse {
    /// Category invalidated, absent for a full clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Key invalidated, absent for a category-wide or full clear
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    /// Number of entries removed
    pub removed: usize,
}

impl InvalidateResponse {
    pub fn new(category: Option<String>, key: Option<String>, removed: usize) -> Self {
        Self {
            category,
            key,
            removed,
        }
    }
}

/// One row of GET /categories
#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub name: String,
    pub enabled: bool,
    /// Effective default TTL in seconds
    pub default_ttl: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_entries: Option<usize>,
    /// Entries currently held
    pub entries: usize,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
