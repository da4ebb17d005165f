//! Equality filters built from optional query parameters.
//!
//! A `Filter` starts empty, which matches every document. Each term pins one
//! top-level field to an exact JSON value; a document matches only if every
//! term matches.

use serde_json::{Map, Value};

/// Conjunction of field equality terms
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Value)>,
}

impl Filter {
    /// Filter that matches everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field == value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    /// Require `field == value` only when a value is given
    pub fn eq_opt<V: Into<Value>>(self, field: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.eq(field, value),
            None => self,
        }
    }

    /// True when no terms have been added
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Terms in the order they were added
    pub fn terms(&self) -> &[(String, Value)] {
        &self.terms
    }

    /// Whether `fields` satisfies every term
    pub fn matches(&self, fields: &Map<String, Value>) -> bool {
        self.terms
            .iter()
            .all(|(field, expected)| fields.get(field) == Some(expected))
    }
}
