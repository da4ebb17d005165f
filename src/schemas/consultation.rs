//! Consultation requests

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::CONSULTATION_COLLECTION;
use crate::schemas::fields::{FieldReader, Length};
use crate::storage::Record;
use crate::types::ValidationErrors;

const NAME: Length = Length::between(2, 100);
const PHONE: Length = Length::between(7, 20);
const MESSAGE: Length = Length::between(10, 1000);

/// A virtual or phone consultation request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// Visitor name
    pub name: String,
    /// Visitor email, domain lowercased
    pub email: String,
    /// Phone number
    pub phone: Option<String>,
    /// What the visitor would like to discuss
    pub message: String,
    /// Optional preferred date
    pub preferred_date: Option<NaiveDate>,
}

impl Consultation {
    /// Validate a raw request body
    pub fn validate(body: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(body);
        let name = reader.required_str("name", NAME);
        let email = reader.required_email("email");
        let phone = reader.optional_str("phone", PHONE);
        let message = reader.required_str("message", MESSAGE);
        let preferred_date = reader.optional_date("preferred_date");
        let errors = reader.finish();

        match (name, email, message) {
            (Some(name), Some(email), Some(message)) if errors.is_empty() => {
                Ok(Consultation { name, email, phone, message, preferred_date })
            }
            _ => Err(errors),
        }
    }
}

impl Record for Consultation {
    const COLLECTION: &'static str = CONSULTATION_COLLECTION;
}
