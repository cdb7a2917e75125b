//! API module
//!
//! Route table and HTTP request handlers.

pub mod agreements;
pub mod middleware;

use crate::state::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Build the application router
///
/// `public_dir` must contain `sign.html` and `success.html`; any other file
/// in it is served as-is.
pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/createAgreement", post(agreements::create_agreement))
        .route(
            "/checkAgreementStatus/:agreementId",
            get(agreements::check_agreement_status),
        )
        .route("/api/health", get(health_check))
        .route_service("/sign.html", ServeFile::new(public_dir.join("sign.html")))
        .route_service("/success", ServeFile::new(public_dir.join("success.html")))
        .fallback_service(ServeDir::new(public_dir))
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
