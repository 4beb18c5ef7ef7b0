//! API Routes
//!
//! Configures the Axum router with all contacts broker endpoints.

use axum::{
    routing::{delete, get, patch},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    all_contacts_handler, config_handler, contact_by_name_handler, contact_by_phone_handler,
    health_handler, invalidate_all_handler, invalidate_key_handler, stats_handler,
    update_config_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /contacts` - Full contact snapshot (cache-checked)
/// - `GET /contacts/:name` - Phone numbers for a name
/// - `GET /contacts/phone/:number` - Reverse phone lookup
/// - `GET /cache/stats` - Cache statistics
/// - `GET /cache/config` / `PATCH /cache/config` - View / update cache config
/// - `DELETE /cache` / `DELETE /cache/:key` - Invalidate all / one entry
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/contacts", get(all_contacts_handler))
        .route("/contacts/:name", get(contact_by_name_handler))
        .route("/contacts/phone/:number", get(contact_by_phone_handler))
        .route("/cache/stats", get(stats_handler))
        .route(
            "/cache/config",
            get(config_handler).patch(update_config_handler),
        )
        .route("/cache", delete(invalidate_all_handler))
        .route("/cache/:key", delete(invalidate_key_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
