//! HTTP server implementation for the Dentistry API

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::{diagnostics, handlers};
use crate::core::AppState;
use crate::types::Result;

/// Creates the main application router with all routes and middleware
pub fn create_app(state: Arc<AppState>) -> Router {
    // CORS configuration - browser forms on any origin post here directly
    let cors = CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(Any);

    Router::new()
        // Root route
        .route("/", get(handlers::root_handler))

        // Diagnostics
        .route("/test", get(diagnostics::diagnostics_handler))

        // Appointment routes
        .route(
            "/api/appointments",
            get(handlers::list_appointments).post(handlers::create_appointment),
        )

        // Consultation routes
        .route(
            "/api/consultations",
            get(handlers::list_consultations).post(handlers::create_consultation),
        )

        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::method_not_allowed)

        // Apply middleware to ALL routes
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
        )
        .with_state(state)
}

/// Serve the API until `shutdown` resolves
pub async fn start_server<F>(state: Arc<AppState>, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.server.addr();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("Server listening on http://{}", addr);
    tracing::info!("Diagnostics available at http://{}/test", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
