//! Request and Response models for the diagnostics API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{validate_key, validate_ttl, SetRequest, ToggleRequest, MAX_KEY_LENGTH};
pub use responses::{
    CategoryResponse, GetResponse, HealthResponse, InvalidateResponse, SetResponse,
};
