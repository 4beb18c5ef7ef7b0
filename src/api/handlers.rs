//! API Handlers
//!
//! HTTP request handlers for each contacts broker endpoint.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::config::CacheConfig;
use crate::error::{BrokerError, Result};
use crate::models::{
    ConfigUpdateRequest, ContactResponse, ContactsResponse, HealthResponse, InvalidateResponse,
    PhoneLookupResponse, StatsResponse,
};
use crate::service::ContactService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The cache-aware contact service
    pub service: Arc<ContactService>,
}

impl AppState {
    /// Creates a new AppState wrapping the given service.
    pub fn new(service: ContactService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Handler for GET /contacts
///
/// Returns the full contact snapshot, served from cache when possible.
pub async fn all_contacts_handler(
    State(state): State<AppState>,
) -> Result<Json<ContactsResponse>> {
    let snapshot = state.service.get_all_contacts().await?;
    Ok(Json(ContactsResponse::new(snapshot)))
}

/// Handler for GET /contacts/:name
///
/// Returns the phone numbers for a contact name; an empty list when
/// nothing matched.
pub async fn contact_by_name_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<ContactResponse>> {
    let phones = state.service.find_by_name(&name).await?;
    Ok(Json(ContactResponse::new(name, phones)))
}

/// Handler for GET /contacts/phone/:number
///
/// Resolves a phone number to a contact name; 404 when no contact
/// carries the number.
pub async fn contact_by_phone_handler(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<PhoneLookupResponse>> {
    match state.service.find_by_phone(&number).await? {
        Some(name) => Ok(Json(PhoneLookupResponse::new(number, name))),
        None => Err(BrokerError::NotFound(format!(
            "no contact with number {number}"
        ))),
    }
}

/// Handler for GET /cache/stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.service.cache_stats().await;
    Json(StatsResponse::from(stats))
}

/// Handler for GET /cache/config
pub async fn config_handler(State(state): State<AppState>) -> Json<CacheConfig> {
    Json(state.service.cache_config().await)
}

/// Handler for PATCH /cache/config
///
/// Applies a partial configuration update and returns the resulting
/// configuration.
pub async fn update_config_handler(
    State(state): State<AppState>,
    Json(req): Json<ConfigUpdateRequest>,
) -> Result<Json<CacheConfig>> {
    if let Some(error_msg) = req.validate() {
        return Err(BrokerError::InvalidRequest(error_msg));
    }

    let config = state.service.update_cache_config(&req.into_update()).await;
    Ok(Json(config))
}

/// Handler for DELETE /cache
pub async fn invalidate_all_handler(State(state): State<AppState>) -> Json<InvalidateResponse> {
    state.service.invalidate_cache(None).await;
    Json(InvalidateResponse::all())
}

/// Handler for DELETE /cache/:key
pub async fn invalidate_key_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<InvalidateResponse> {
    state.service.invalidate_cache(Some(&key)).await;
    Json(InvalidateResponse::key(key))
}

/// Handler for GET /health
///
/// Returns health status of the server.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
