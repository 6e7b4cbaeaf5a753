//! Request DTOs for the diagnostics API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;
use serde_json::Value;

use crate::cache::MAX_TTL_SECS;

/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 256;

/// Request body for the SET operation (PUT /cache/:category/:key)
///
/// # Fields
/// - `value`: The payload to store, any JSON
/// - `ttl`: Optional TTL in seconds (uses the category default if not specified)
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The value to store
    pub value: Value,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl: Option<u64>,
}

/// Request body for PUT /categories/:category/enabled
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleRequest {
    pub enabled: bool,
}

/// Validates a cache key taken from a request path.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}

/// Validates an optional TTL override taken from a request body.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_ttl(ttl: Option<u64>) -> Option<String> {
    match ttl {
        Some(secs) if secs > MAX_TTL_SECS => Some(format!(
            "TTL exceeds maximum of {} seconds",
            MAX_TTL_SECS
        )),
        _ => None,
    }
}
