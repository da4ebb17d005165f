//! Record schemas
//!
//! Each record type owns an explicit `validate` function that turns a raw
//! JSON object into a normalized record or the full list of field errors.
//! Validation has no side effects and runs before any store access.

/// Field readers and constraint checks
pub mod fields;

/// Email address syntax checks
pub mod email;

/// Dental appointment bookings
pub mod appointment;

/// Consultation requests
pub mod consultation;

pub use appointment::Appointment;
pub use consultation::Consultation;
pub use fields::{FieldReader, Length};
