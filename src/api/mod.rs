//! API Module
//!
//! HTTP handlers and routing for the cache diagnostics API.
//!
//! # Endpoints
//! - `PUT /cache/:category/:key` - Store a value
//! - `GET /cache/:category/:key` - Retrieve a value
//! - `DELETE /cache/:category/:key` - Invalidate one key
//! - `DELETE /cache/:category` - Invalidate a whole category
//! - `DELETE /cache` - Clear every category
//! - `GET /stats` - Get cache statistics
//! - `POST /stats/reset` - Zero the statistics counters
//! - `GET /categories` - List category configuration
//! - `PUT /categories/:category/enabled` - Enable or disable a category
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
