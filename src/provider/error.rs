//! Provider-specific error types
//!
//! Errors that can occur while talking to the e-signature provider.

use thiserror::Error;

/// Errors returned by an `AgreementProvider`
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The HTTP request could not be sent or its body not read
    #[error("Request to provider failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-2xx status
    #[error("Provider returned status {status}: {}", code.as_deref().unwrap_or("UNKNOWN"))]
    Api {
        /// HTTP status code
        status: u16,
        /// Provider error code, if the body carried one
        code: Option<String>,
        /// Provider error message, if the body carried one
        message: Option<String>,
    },

    /// Agreement URL could not be built from the configured API base
    #[error("Invalid provider URL: {0}")]
    InvalidUrl(String),

    /// Body was expected to be JSON but was not
    #[error("Failed to parse provider response: {0}")]
    InvalidJson(String),

    /// Body parsed but lacked a required field
    #[error("Provider response is missing field: {0}")]
    MissingField(&'static str),
}
