//! Shared helpers for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use esign_session_backend::provider::{
    AgreementId, AgreementProvider, AgreementState, ProviderError, SignerInfo, SigningUrl,
    SigningUrlResult, SigningUrlSetInfo,
};
use std::time::Duration;
use tower::ServiceExt;

/// Provider keyed by signer: each agreement id and URL embeds the signer name
pub struct EchoProvider {
    /// Delay applied to the create call, per signer name
    pub create_delay: fn(&str) -> Duration,
    /// Status returned by `get_status`
    pub status: String,
}

impl EchoProvider {
    pub fn new() -> Self {
        Self {
            create_delay: |_| Duration::ZERO,
            status: "OUT_FOR_SIGNATURE".to_string(),
        }
    }
}

#[async_trait]
impl AgreementProvider for EchoProvider {
    async fn create_agreement(&self, signer: &SignerInfo) -> Result<AgreementId, ProviderError> {
        tokio::time::sleep((self.create_delay)(&signer.name)).await;
        Ok(format!("agr-{}", signer.name))
    }

    async fn set_state(
        &self,
        _agreement_id: &str,
        _state: AgreementState,
    ) -> Result<(), ProviderError> {
        tokio::task::yield_now().await;
        Ok(())
    }

    async fn get_signing_urls(&self, agreement_id: &str) -> Result<SigningUrlResult, ProviderError> {
        Ok(SigningUrlResult::Ready(vec![SigningUrlSetInfo {
            signing_urls: vec![SigningUrl {
                email: None,
                esign_url: Some(format!("https://sign.example/{}", agreement_id)),
            }],
            signing_url_set_name: None,
        }]))
    }

    async fn get_status(&self, _agreement_id: &str) -> Result<String, ProviderError> {
        Ok(self.status.clone())
    }
}

/// Send a request through the router and decode the JSON response
pub async fn send_json(
    app: Router,
    request: Request<Body>,
) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, body)
}

pub fn create_request(name: &str, email: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/createAgreement")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::json!({"name": name, "email": email}).to_string(),
        ))
        .unwrap()
}

pub fn status_request(agreement_id: &str) -> Request<Body> {
    Request::builder()
        .uri(format!("/checkAgreementStatus/{}", agreement_id))
        .body(Body::empty())
        .unwrap()
}
