//! # API Module
//!
//! HTTP interface for the Dentistry API.
//!
//! ## Endpoints Overview
//!
//! - `GET /` - Liveness message
//! - `GET /test` - Store connectivity diagnostics
//! - `POST /api/appointments` - Book an appointment
//! - `GET /api/appointments?service=&date_on=&limit=` - List appointments
//! - `POST /api/consultations` - Request a consultation
//! - `GET /api/consultations?limit=` - List consultations

/// Error to response mapping
pub mod error;

/// Request extractors
pub mod extract;

/// HTTP request handlers
pub mod handlers;

/// Diagnostic endpoint
pub mod diagnostics;

/// HTTP server implementation
pub mod server;

// Re-export commonly used items
pub use error::ApiError;
pub use server::{create_app, start_server};
