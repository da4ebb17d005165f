//! Dentistry API - appointment and consultation booking backend
//!
//! Visitors submit booking and consultation forms; the service validates each
//! field, stores the record in a document store and lists stored records with
//! simple equality filters. Records are never updated or deleted.
#![warn(missing_docs)]

/// Application constants
pub mod constants;

/// Identifier and error types
pub mod types;

/// Record schemas and validation
pub mod schemas;

/// Document store abstraction and backends
pub mod storage;

/// Configuration, logging and shared state
pub mod core;

/// HTTP API
pub mod api;

// Re-export commonly used items for convenience
pub use crate::core::Config;
pub use types::{Error, Result};

/// Crate version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
