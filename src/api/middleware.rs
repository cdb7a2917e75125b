//! HTTP middleware

use axum::{
    extract::{MatchedPath, Request},
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

/// Response header echoing the per-request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Tag each request with an id, log its route and outcome, echo the id back
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    // Files reached through the static-dir fallback have no matched route
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| "static".to_string());
    let method = request.method().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        route = %route,
    );

    let mut response = next.run(request).instrument(span).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    let status = response.status();
    if status.is_server_error() {
        tracing::warn!(
            request_id = %request_id,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request failed"
        );
    } else {
        info!(
            request_id = %request_id,
            route = %route,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Request served"
        );
    }

    response
}
