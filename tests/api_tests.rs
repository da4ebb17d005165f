//! Router-level tests for the HTTP API

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    Router,
};
use dentistry_api::{
    api::create_app,
    core::{create_app_state, AppState, Config},
};
use serde_json::{json, Value};
use tower::ServiceExt;

fn memory_config() -> Config {
    let mut config = Config::default();
    config.database.url = Some("memory://test".to_string());
    config.database.name = Some("dentistry".to_string());
    config
}

fn app_with(config: Config) -> (Router, Arc<AppState>) {
    let state = create_app_state(config);
    (create_app(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };
    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, value)
}

fn jane(service: &str, date: &str) -> Value {
    json!({
        "name": "Jane Doe",
        "email": "jane@example.com",
        "phone": "5551234567",
        "service": service,
        "appointment_date": date,
        "time_slot": "10:00 AM"
    })
}

#[tokio::test]
async fn root_reports_running() {
    let (app, _) = app_with(memory_config());
    let (status, body) = send(&app, Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Dentistry API running"}));
}

#[tokio::test]
async fn create_appointment_returns_hex_id() {
    let (app, _) = app_with(memory_config());
    let (status, body) =
        send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Appointment request received");
    let id = body["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
}

#[tokio::test]
async fn created_appointment_round_trips_through_listing() {
    let (app, _) = app_with(memory_config());
    let mut payload = jane("Cleaning", "2024-06-01");
    payload["notes"] = json!("Sensitive teeth");
    let (_, created) = send(&app, Method::POST, "/api/appointments", Some(payload)).await;

    let (status, list) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = list.as_array().unwrap();
    assert_eq!(records.len(), 1);

    let record = &records[0];
    assert_eq!(record["id"], created["id"]);
    assert!(record.get("_id").is_none());
    assert_eq!(record["name"], "Jane Doe");
    assert_eq!(record["email"], "jane@example.com");
    assert_eq!(record["phone"], "5551234567");
    assert_eq!(record["service"], "Cleaning");
    assert_eq!(record["appointment_date"], "2024-06-01");
    assert_eq!(record["time_slot"], "10:00 AM");
    assert_eq!(record["notes"], "Sensitive teeth");
    assert!(record["created_at"].is_string());
}

#[tokio::test]
async fn invalid_appointments_are_rejected_and_not_stored() {
    let (app, _) = app_with(memory_config());

    let cases = [
        ("name", json!("J")),
        ("email", json!("jane-at-example.com")),
        ("phone", json!("555123")),
    ];
    for (field, value) in cases {
        let mut payload = jane("Cleaning", "2024-06-01");
        payload[field] = value;
        let (status, body) = send(&app, Method::POST, "/api/appointments", Some(payload)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "field {field}");
        let detail = body["detail"].as_array().unwrap();
        assert_eq!(detail.len(), 1);
        assert_eq!(detail[0]["loc"], json!(["body", field]));
    }

    let (_, list) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_fields_are_all_reported() {
    let (app, _) = app_with(memory_config());
    let (status, body) =
        send(&app, Method::POST, "/api/appointments", Some(json!({"name": "Jane Doe"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let fields: Vec<&str> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["loc"][1].as_str().unwrap())
        .collect();
    assert_eq!(fields, vec!["email", "phone", "service", "appointment_date", "time_slot"]);
    assert!(body["detail"].as_array().unwrap().iter().all(|d| d["type"] == "missing"));
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, _) = app_with(memory_config());
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/appointments")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn listing_filters_by_service_and_date() {
    let (app, _) = app_with(memory_config());
    for (service, date) in [
        ("Cleaning", "2024-06-01"),
        ("Checkup", "2024-06-01"),
        ("Cleaning", "2024-06-02"),
    ] {
        let (status, _) = send(&app, Method::POST, "/api/appointments", Some(jane(service, date))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, cleaning) = send(&app, Method::GET, "/api/appointments?service=Cleaning", None).await;
    let cleaning = cleaning.as_array().unwrap();
    assert_eq!(cleaning.len(), 2);
    assert!(cleaning.iter().all(|r| r["service"] == "Cleaning"));

    let (_, on_day) = send(&app, Method::GET, "/api/appointments?date_on=2024-06-01", None).await;
    assert_eq!(on_day.as_array().unwrap().len(), 2);

    let (_, both) =
        send(&app, Method::GET, "/api/appointments?service=Cleaning&date_on=2024-06-02", None).await;
    let both = both.as_array().unwrap();
    assert_eq!(both.len(), 1);
    assert_eq!(both[0]["appointment_date"], "2024-06-02");

    let (_, empty_service) = send(&app, Method::GET, "/api/appointments?service=", None).await;
    assert_eq!(empty_service.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn limit_caps_listing() {
    let (app, _) = app_with(memory_config());
    for _ in 0..3 {
        send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;
    }
    let (_, one) = send(&app, Method::GET, "/api/appointments?limit=1", None).await;
    assert_eq!(one.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn default_limit_comes_from_config() {
    let mut config = memory_config();
    config.api.default_list_limit = 2;
    let (app, _) = app_with(config);
    for _ in 0..3 {
        send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;
    }
    let (_, list) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn bad_query_parameters_are_unprocessable() {
    let (app, _) = app_with(memory_config());
    let (status, body) = send(&app, Method::GET, "/api/appointments?date_on=June", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string());

    let (status, _) = send(&app, Method::GET, "/api/consultations?limit=-1", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn consultations_create_and_list() {
    let (app, _) = app_with(memory_config());
    let payload = json!({
        "name": "Sam",
        "email": "sam@example.org",
        "message": "Do you offer evening appointments?",
        "preferred_date": "2024-07-15"
    });
    let (status, created) = send(&app, Method::POST, "/api/consultations", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "Consultation request received");

    let (status, list) = send(&app, Method::GET, "/api/consultations?limit=5", None).await;
    assert_eq!(status, StatusCode::OK);
    let records = list.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["id"], created["id"]);
    assert_eq!(records[0]["phone"], Value::Null);
    assert_eq!(records[0]["preferred_date"], "2024-07-15");

    let (_, appointments) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(appointments, json!([]));
}

#[tokio::test]
async fn invalid_consultation_is_rejected() {
    let (app, _) = app_with(memory_config());
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/consultations",
        Some(json!({"name": "Sam", "email": "sam@example.org", "message": "hi"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["type"], "string_too_short");
}

#[tokio::test]
async fn concurrent_creates_are_both_retrievable() {
    let (app, _) = app_with(memory_config());
    let (a, b) = tokio::join!(
        send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))),
        send(&app, Method::POST, "/api/appointments", Some(jane("Checkup", "2024-06-02"))),
    );
    assert_eq!(a.0, StatusCode::CREATED);
    assert_eq!(b.0, StatusCode::CREATED);
    assert_ne!(a.1["id"], b.1["id"]);

    let (_, list) = send(&app, Method::GET, "/api/appointments", None).await;
    let ids: Vec<&Value> = list.as_array().unwrap().iter().map(|r| &r["id"]).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&&a.1["id"]));
    assert!(ids.contains(&&b.1["id"]));
}

#[tokio::test]
async fn without_store_writes_fail_but_diagnostics_work() {
    let (app, _) = app_with(Config::default());

    let (status, body) =
        send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["detail"].as_str().unwrap().starts_with("Database not available"));

    let (status, _) = send(&app, Method::GET, "/api/consultations", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, report) = send(&app, Method::GET, "/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["backend"], "✅ Running");
    assert_eq!(report["connection_status"], "Not Connected");
    assert_eq!(report["collections"], json!([]));
}

#[tokio::test]
async fn validation_runs_before_store_lookup() {
    let (app, _) = app_with(Config::default());
    let (status, _) =
        send(&app, Method::POST, "/api/appointments", Some(json!({"name": "J"}))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn unreachable_store_reports_not_available() {
    let mut config = Config::default();
    config.database.url = Some("mongodb://db.invalid:27017".to_string());
    config.database.name = Some("dentistry".to_string());
    let (app, _) = app_with(config);

    let (status, report) = send(&app, Method::GET, "/test", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["database"], "❌ Not Available");
    assert!(report["connection_status"].as_str().unwrap().starts_with("Not Connected: "));
}

#[tokio::test]
async fn diagnostics_list_collections_once_written() {
    let (app, _) = app_with(memory_config());
    send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;

    let (_, report) = send(&app, Method::GET, "/test", None).await;
    assert_eq!(report["database"], "✅ Connected & Working");
    assert_eq!(report["database_url"], "✅ Set");
    assert_eq!(report["database_name"], "✅ Set");
    assert_eq!(report["collections"], json!(["appointment"]));
}

#[tokio::test]
async fn file_store_persists_across_restarts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.database.url = Some(format!("file://{}", dir.path().display()));
    config.database.name = Some("dentistry".to_string());

    let created = {
        let (app, _) = app_with(config.clone());
        let (status, body) =
            send(&app, Method::POST, "/api/appointments", Some(jane("Cleaning", "2024-06-01"))).await;
        assert_eq!(status, StatusCode::CREATED);
        body
    };

    let (app, _) = app_with(config);
    let (_, list) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(list[0]["id"], created["id"]);
}

#[tokio::test]
async fn unknown_routes_return_json_404() {
    let (app, _) = app_with(memory_config());
    let (status, body) = send(&app, Method::GET, "/api/patients", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not Found"}));
}

#[tokio::test]
async fn wrong_method_returns_json_405() {
    let (app, _) = app_with(memory_config());
    let (status, body) = send(&app, Method::DELETE, "/api/appointments", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));

    let (status, body) = send(&app, Method::PUT, "/", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body, json!({"detail": "Method Not Allowed"}));
}

#[tokio::test]
async fn internationalized_email_is_accepted() {
    let (app, _) = app_with(memory_config());
    let mut payload = jane("Cleaning", "2024-06-01");
    payload["email"] = json!("josé@Bücher.de");
    let (status, _) = send(&app, Method::POST, "/api/appointments", Some(payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(&app, Method::GET, "/api/appointments", None).await;
    assert_eq!(list[0]["email"], "josé@bücher.de");
}
