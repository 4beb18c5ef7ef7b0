//! API Module
//!
//! HTTP handlers and routing for the contacts broker REST API.
//!
//! # Endpoints
//! - `GET /contacts` - Full contact snapshot (cache-checked)
//! - `GET /contacts/:name` - Phone numbers for a name
//! - `GET /contacts/phone/:number` - Reverse phone lookup
//! - `GET /cache/stats` - Cache statistics
//! - `GET /cache/config` / `PATCH /cache/config` - View / update cache config
//! - `DELETE /cache` / `DELETE /cache/:key` - Invalidate all / one entry
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
