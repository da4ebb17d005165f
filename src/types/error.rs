//! Error types and handling for the Dentistry API
//!
//! This module defines the error taxonomy shared by the schema, storage and
//! HTTP layers. Validation failures never reach the store; storage failures
//! are reported once and never retried.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Main result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the Dentistry API
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request payload failed schema validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// Storage layer errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// I/O errors from std
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage-specific errors
#[derive(Error, Debug)]
pub enum StorageError {
    /// No store is configured or it failed to initialize
    #[error("{0}")]
    Unavailable(String),

    /// The store refused the write
    #[error("Insert rejected: {0}")]
    Rejected(String),

    /// Persisted data could not be read back
    #[error("Data corruption detected: {0}")]
    Corrupted(String),

    /// Disk I/O operation failed
    #[error("Disk I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Document (de)serialization failed
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Machine-readable constraint that a field violated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// Required field absent (or null)
    Missing,
    /// Value was not a JSON string
    NotAString,
    /// String shorter than the lower bound
    TooShort {
        /// Minimum character count
        min: usize,
    },
    /// String longer than the upper bound
    TooLong {
        /// Maximum character count
        max: usize,
    },
    /// Not a syntactically valid email address
    InvalidEmail(String),
    /// Value was not a string holding a date
    NotADate,
    /// String could not be parsed as `YYYY-MM-DD`
    InvalidDate,
}

impl FieldErrorKind {
    /// Stable error code surfaced to clients
    pub fn code(&self) -> &'static str {
        match self {
            FieldErrorKind::Missing => "missing",
            FieldErrorKind::NotAString => "string_type",
            FieldErrorKind::TooShort { .. } => "string_too_short",
            FieldErrorKind::TooLong { .. } => "string_too_long",
            FieldErrorKind::InvalidEmail(_) => "value_error",
            FieldErrorKind::NotADate => "date_type",
            FieldErrorKind::InvalidDate => "date_from_datetime_parsing",
        }
    }
}

impl fmt::Display for FieldErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldErrorKind::Missing => write!(f, "Field required"),
            FieldErrorKind::NotAString => write!(f, "Input should be a valid string"),
            FieldErrorKind::TooShort { min } => {
                write!(f, "String should have at least {} characters", min)
            }
            FieldErrorKind::TooLong { max } => {
                write!(f, "String should have at most {} characters", max)
            }
            FieldErrorKind::InvalidEmail(reason) => {
                write!(f, "value is not a valid email address: {}", reason)
            }
            FieldErrorKind::NotADate => write!(f, "Input should be a valid date"),
            FieldErrorKind::InvalidDate => {
                write!(f, "Input should be a valid date in the format YYYY-MM-DD")
            }
        }
    }
}

/// A single violated constraint on a named field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,
    /// What was wrong with it
    pub kind: FieldErrorKind,
}

impl FieldError {
    /// Create a field error
    pub fn new(field: &'static str, kind: FieldErrorKind) -> Self {
        Self { field, kind }
    }
}

/// Client-facing shape of one field error
#[derive(Debug, Serialize)]
pub struct FieldErrorDetail {
    /// Location of the field, e.g. `["body", "email"]`
    pub loc: Vec<String>,
    /// Human readable message
    pub msg: String,
    /// Error code
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<&FieldError> for FieldErrorDetail {
    fn from(err: &FieldError) -> Self {
        Self {
            loc: vec!["body".to_string(), err.field.to_string()],
            msg: err.kind.to_string(),
            kind: err.kind.code(),
        }
    }
}

/// Every field error found while validating one payload
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation
    pub fn push(&mut self, field: &'static str, kind: FieldErrorKind) {
        self.errors.push(FieldError::new(field, kind));
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Recorded violations, in field order
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Whether a given field has at least one violation
    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Client-facing representation
    pub fn details(&self) -> Vec<FieldErrorDetail> {
        self.errors.iter().map(FieldErrorDetail::from).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.kind))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Cut `msg` to at most `max` characters without splitting a code point
pub fn truncate_message(msg: &str, max: usize) -> String {
    match msg.char_indices().nth(max) {
        Some((idx, _)) => msg[..idx].to_string(),
        None => msg.to_string(),
    }
}
