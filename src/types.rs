//! Type definitions for the Dentistry API
//!
//! This module contains the identifier and error types shared by every layer.

/// Identifier types
pub mod ids;
/// System-wide error types
pub mod error;

// Re-export commonly used types for convenience
pub use ids::DocumentId;
pub use error::{
    truncate_message, Error, FieldError, FieldErrorDetail, FieldErrorKind, Result, StorageError,
    ValidationErrors,
};
