//! `GET /test`: store connectivity diagnostics.
//!
//! Each sub-check (ping, collection listing) runs on its own; a failure in
//! one is recorded in the report and the remaining checks still run.
//! Error text is cut to a short prefix.

use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::constants::MAX_DIAGNOSTIC_ERROR_CHARS;
use crate::core::{AppState, StoreStatus};
use crate::types::truncate_message;

const BACKEND_RUNNING: &str = "✅ Running";
const DATABASE_NOT_AVAILABLE: &str = "❌ Not Available";
const DATABASE_NOT_INITIALIZED: &str = "⚠️ Available but not initialized";
const DATABASE_WORKING: &str = "✅ Connected & Working";
const SET: &str = "✅ Set";
const NOT_SET: &str = "❌ Not Set";

/// Diagnostic report
#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    /// API process status
    pub backend: String,
    /// Overall store status
    pub database: String,
    /// Whether a database URL is configured
    pub database_url: Option<String>,
    /// Whether a database name is configured
    pub database_name: Option<String>,
    /// Result of pinging the store
    pub connection_status: String,
    /// Sample of collection names
    pub collections: Vec<String>,
}

fn set_flag(value: &Option<String>) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => SET.to_string(),
        _ => NOT_SET.to_string(),
    }
}

fn short(err: impl ToString) -> String {
    truncate_message(&err.to_string(), MAX_DIAGNOSTIC_ERROR_CHARS)
}

/// Build the diagnostic report for `state`
pub fn diagnose(state: &AppState) -> DiagnosticReport {
    let mut report = DiagnosticReport {
        backend: BACKEND_RUNNING.to_string(),
        database: DATABASE_NOT_AVAILABLE.to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    let db = match &state.store {
        StoreStatus::Ready(db) => db,
        StoreStatus::NotConfigured => {
            report.database = DATABASE_NOT_INITIALIZED.to_string();
            return report;
        }
        StoreStatus::Failed(err) => {
            report.connection_status = format!("Not Connected: {}", short(err));
            return report;
        }
    };

    report.database = DATABASE_WORKING.to_string();
    report.database_url = Some(set_flag(&state.config.database.url));
    report.database_name = Some(set_flag(&state.config.database.name));

    match db.store.ping() {
        Ok(()) => report.connection_status = format!("Connected ({})", db.store.backend()),
        Err(e) => {
            tracing::warn!(error = %e, "diagnostic ping failed");
            report.connection_status = format!("Error: {}", short(&e));
            report.database = format!("⚠️ Connected but Error: {}", short(&e));
        }
    }

    if state.config.diagnostics.expose_collections {
        match db.store.list_collection_names() {
            Ok(names) => {
                report.collections = names
                    .into_iter()
                    .take(state.config.diagnostics.max_collections)
                    .collect();
            }
            Err(e) => {
                tracing::warn!(error = %e, "diagnostic collection listing failed");
                report.database = format!("⚠️ Connected but Error: {}", short(&e));
            }
        }
    }

    report
}

/// `GET /test`
pub async fn diagnostics_handler(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    Json(diagnose(&state))
}
