//! Request and Response models for the contacts broker API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ConfigUpdateRequest;
pub use responses::{
    ContactResponse, ContactsResponse, ErrorResponse, HealthResponse, InvalidateResponse,
    PhoneLookupResponse, StatsResponse,
};
