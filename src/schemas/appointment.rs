//! Dental appointment bookings

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::APPOINTMENT_COLLECTION;
use crate::schemas::fields::{FieldReader, Length};
use crate::storage::Record;
use crate::types::ValidationErrors;

const NAME: Length = Length::between(2, 100);
const PHONE: Length = Length::between(7, 20);
const NOTES: Length = Length::at_most(500);

/// An appointment request submitted through the booking form.
///
/// Stored in the `appointment` collection and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Patient full name
    pub name: String,
    /// Patient email, domain lowercased
    pub email: String,
    /// Contact phone number
    pub phone: String,
    /// Requested service, e.g. Cleaning or Checkup
    pub service: String,
    /// Preferred appointment date
    pub appointment_date: NaiveDate,
    /// Preferred time window, e.g. 10:00 AM
    pub time_slot: String,
    /// Additional notes
    pub notes: Option<String>,
}

impl Appointment {
    /// Validate a raw request body
    pub fn validate(body: &Map<String, Value>) -> Result<Self, ValidationErrors> {
        let mut reader = FieldReader::new(body);
        let name = reader.required_str("name", NAME);
        let email = reader.required_email("email");
        let phone = reader.required_str("phone", PHONE);
        let service = reader.required_str("service", Length::ANY);
        let appointment_date = reader.required_date("appointment_date");
        let time_slot = reader.required_str("time_slot", Length::ANY);
        let notes = reader.optional_str("notes", NOTES);
        let errors = reader.finish();

        match (name, email, phone, service, appointment_date, time_slot) {
            (Some(name), Some(email), Some(phone), Some(service), Some(appointment_date), Some(time_slot))
                if errors.is_empty() =>
            {
                Ok(Appointment { name, email, phone, service, appointment_date, time_slot, notes })
            }
            _ => Err(errors),
        }
    }
}

impl Record for Appointment {
    const COLLECTION: &'static str = APPOINTMENT_COLLECTION;
}
