//! Field readers over a raw JSON object.
//!
//! A `FieldReader` pulls typed values out of a request body and records every
//! violation it finds instead of stopping at the first one. A reader method
//! returns `None` exactly when it either recorded an error or the optional
//! field was absent.

use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::schemas::email;
use crate::types::{FieldErrorKind, ValidationErrors};

/// Inclusive bounds on a string's character count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length {
    /// Minimum characters, if bounded below
    pub min: Option<usize>,
    /// Maximum characters, if bounded above
    pub max: Option<usize>,
}

impl Length {
    /// No constraint at all
    pub const ANY: Length = Length { min: None, max: None };

    /// Between `min` and `max` characters inclusive
    pub const fn between(min: usize, max: usize) -> Self {
        Length { min: Some(min), max: Some(max) }
    }

    /// At most `max` characters
    pub const fn at_most(max: usize) -> Self {
        Length { min: None, max: Some(max) }
    }

    /// Check `value` against the bounds, counting Unicode scalar values
    pub fn check(&self, value: &str) -> Result<(), FieldErrorKind> {
        let len = value.chars().count();
        if let Some(min) = self.min {
            if len < min {
                return Err(FieldErrorKind::TooShort { min });
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return Err(FieldErrorKind::TooLong { max });
            }
        }
        Ok(())
    }
}

/// Collects typed fields and their violations from one request body
pub struct FieldReader<'a> {
    body: &'a Map<String, Value>,
    errors: ValidationErrors,
}

impl<'a> FieldReader<'a> {
    /// Start reading `body`
    pub fn new(body: &'a Map<String, Value>) -> Self {
        Self { body, errors: ValidationErrors::new() }
    }

    // JSON null is treated as absent
    fn present(&self, field: &str) -> Option<&'a Value> {
        match self.body.get(field) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    fn string(&mut self, field: &'static str, value: &Value, length: Length) -> Option<String> {
        let Some(s) = value.as_str() else {
            self.errors.push(field, FieldErrorKind::NotAString);
            return None;
        };
        match length.check(s) {
            Ok(()) => Some(s.to_string()),
            Err(kind) => {
                self.errors.push(field, kind);
                None
            }
        }
    }

    fn date(&mut self, field: &'static str, value: &Value) -> Option<NaiveDate> {
        let Some(s) = value.as_str() else {
            self.errors.push(field, FieldErrorKind::NotADate);
            return None;
        };
        match NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                self.errors.push(field, FieldErrorKind::InvalidDate);
                None
            }
        }
    }

    /// Required string within `length`
    pub fn required_str(&mut self, field: &'static str, length: Length) -> Option<String> {
        match self.present(field) {
            Some(value) => self.string(field, value, length),
            None => {
                self.errors.push(field, FieldErrorKind::Missing);
                None
            }
        }
    }

    /// Optional string within `length`
    pub fn optional_str(&mut self, field: &'static str, length: Length) -> Option<String> {
        let value = self.present(field)?;
        self.string(field, value, length)
    }

    /// Required email address, normalized
    pub fn required_email(&mut self, field: &'static str) -> Option<String> {
        let raw = self.required_str(field, Length::ANY)?;
        match email::normalize(&raw) {
            Ok(normalized) => Some(normalized),
            Err(reason) => {
                self.errors.push(field, FieldErrorKind::InvalidEmail(reason.to_string()));
                None
            }
        }
    }

    /// Required `YYYY-MM-DD` date
    pub fn required_date(&mut self, field: &'static str) -> Option<NaiveDate> {
        match self.present(field) {
            Some(value) => self.date(field, value),
            None => {
                self.errors.push(field, FieldErrorKind::Missing);
                None
            }
        }
    }

    /// Optional `YYYY-MM-DD` date
    pub fn optional_date(&mut self, field: &'static str) -> Option<NaiveDate> {
        let value = self.present(field)?;
        self.date(field, value)
    }

    /// Finish reading and hand back whatever was recorded
    pub fn finish(self) -> ValidationErrors {
        self.errors
    }
}
