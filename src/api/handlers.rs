//! HTTP request handlers for the Dentistry API
//!
//! Create handlers validate the body before touching the store; list handlers
//! build an equality filter from whichever query parameters are present and
//! replace each document's store id with a plain string `id`. Store calls
//! may touch the disk, so they run on the blocking thread pool.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api::error::ApiError;
use crate::api::extract::{JsonRequest, QueryRequest};
use crate::core::AppState;
use crate::schemas::{Appointment, Consultation};
use crate::storage::{Filter, StoredDocument};
use crate::types::StorageError;

/// Root response
#[derive(Debug, Serialize)]
pub struct RootResponse {
    /// Liveness message
    pub message: String,
}

/// Response to a successful create
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    /// Store-assigned id, as a string
    pub id: String,
    /// Acknowledgement
    pub message: String,
}

/// Query parameters for listing appointments
#[derive(Debug, Default, Deserialize)]
pub struct AppointmentListQuery {
    /// Exact service match; empty means no constraint
    pub service: Option<String>,
    /// Exact appointment date match
    pub date_on: Option<NaiveDate>,
    /// Result cap; 0 means no cap
    pub limit: Option<usize>,
}

/// Query parameters for listing consultations
#[derive(Debug, Default, Deserialize)]
pub struct ConsultationListQuery {
    /// Result cap; 0 means no cap
    pub limit: Option<usize>,
}

impl AppointmentListQuery {
    /// Equality filter over the parameters that were given
    pub fn filter(&self) -> Filter {
        Filter::new()
            .eq_opt("service", self.service.as_deref().filter(|s| !s.is_empty()))
            .eq_opt("appointment_date", self.date_on.map(|d| d.format("%Y-%m-%d").to_string()))
    }
}

fn with_string_ids(docs: Vec<StoredDocument>) -> Vec<Value> {
    docs.into_iter().map(StoredDocument::into_json_with_id).collect()
}

/// Run a store operation on the blocking pool
async fn run_blocking<T, F>(op: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let result = tokio::task::spawn_blocking(op)
        .await
        .map_err(|e| StorageError::Unavailable(format!("Store task failed: {}", e)))?;
    Ok(result?)
}

/// `GET /`
pub async fn root_handler() -> Json<RootResponse> {
    Json(RootResponse { message: "Dentistry API running".to_string() })
}

/// `POST /api/appointments`
pub async fn create_appointment(
    State(state): State<Arc<AppState>>,
    JsonRequest(body): JsonRequest<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let appointment = Appointment::validate(&body)?;
    let repo = state.appointments()?;
    let id = run_blocking(move || repo.create(&appointment)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: id.to_hex(),
            message: "Appointment request received".to_string(),
        }),
    ))
}

/// `GET /api/appointments?service=&date_on=&limit=`
pub async fn list_appointments(
    State(state): State<Arc<AppState>>,
    QueryRequest(query): QueryRequest<AppointmentListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let limit = query.limit.unwrap_or(state.config.api.default_list_limit);
    let filter = query.filter();
    let repo = state.appointments()?;
    let docs = run_blocking(move || repo.list(&filter, limit)).await?;
    Ok(Json(with_string_ids(docs)))
}

/// `POST /api/consultations`
pub async fn create_consultation(
    State(state): State<Arc<AppState>>,
    JsonRequest(body): JsonRequest<Map<String, Value>>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let consultation = Consultation::validate(&body)?;
    let repo = state.consultations()?;
    let id = run_blocking(move || repo.create(&consultation)).await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: id.to_hex(),
            message: "Consultation request received".to_string(),
        }),
    ))
}

/// `GET /api/consultations?limit=`
pub async fn list_consultations(
    State(state): State<Arc<AppState>>,
    QueryRequest(query): QueryRequest<ConsultationListQuery>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let limit = query.limit.unwrap_or(state.config.api.default_list_limit);
    let repo = state.consultations()?;
    let docs = run_blocking(move || repo.list(&Filter::new(), limit)).await?;
    Ok(Json(with_string_ids(docs)))
}

/// Fallback for unknown routes
pub async fn not_found() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(serde_json::json!({ "detail": "Not Found" })))
}

/// Fallback for known routes hit with an unsupported method
pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (StatusCode::METHOD_NOT_ALLOWED, Json(serde_json::json!({ "detail": "Method Not Allowed" })))
}
