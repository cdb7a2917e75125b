//! Error types and error handling for the HTTP surface
//!
//! Every failure that reaches a handler is converted into a JSON body of
//! the form `{"error": "<message>"}` with a server-error status.

use crate::orchestrator::SessionError;
use crate::provider::ProviderError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::error::Error as _;
use thiserror::Error;

/// Application-level error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Signing session creation failed; the message names the failing step
    #[error(transparent)]
    Session(#[from] SessionError),

    /// Status lookup against the provider failed
    #[error("Error checking agreement status")]
    Status(#[source] ProviderError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let mut causes = Vec::new();
        let mut source = self.source();
        while let Some(e) = source {
            causes.push(e.to_string());
            source = e.source();
        }
        tracing::error!(error = %self, causes = ?causes, "Request failed");

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
