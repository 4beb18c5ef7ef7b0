//! Error types for the contacts broker
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Broker Error Enum ==
/// Unified error type for the contacts broker.
///
/// Access denial is deliberately its own variant: callers must be able to
/// tell "the directory refused us" apart from "no results". Cache state
/// (disabled, full, expired) never produces an error.
#[derive(Error, Debug)]
pub enum BrokerError {
    /// The contact directory cannot be reached at all
    #[error("Contact directory access denied: {0}")]
    AccessDenied(String),

    /// No contact matched the query
    #[error("Contact not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The bridge command could not be run
    #[error("Contact bridge failure: {0}")]
    Bridge(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for BrokerError {
    fn into_response(self) -> Response {
        let status = match &self {
            BrokerError::AccessDenied(_) => StatusCode::FORBIDDEN,
            BrokerError::NotFound(_) => StatusCode::NOT_FOUND,
            BrokerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            BrokerError::Bridge(_) => StatusCode::BAD_GATEWAY,
            BrokerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the contacts broker.
pub type Result<T> = std::result::Result<T, BrokerError>;
