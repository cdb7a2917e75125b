//! Adobe Sign API client
//!
//! Direct HTTP client for the agreement endpoints of the provider's REST API.
//! Every request carries the bearer credential and asks for JSON.

use crate::config::ProviderConfig;
use crate::provider::adobe_types::{
    AgreementCreationInfo, AgreementCreationResponse, AgreementInfo, AgreementStateInfo,
    ApiErrorBody, FileInfo, MemberInfo, MergeFieldInfo, ParticipantSetInfo, SigningUrlResponse,
    AGREEMENT_NOT_EXPOSED, ROLE_SIGNER, SIGNATURE_TYPE_ESIGN,
};
use crate::provider::{
    AgreementId, AgreementProvider, AgreementState, ProviderError, SignerInfo, SigningUrlResult,
};
use async_trait::async_trait;
use reqwest::{header, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

/// reqwest-backed `AgreementProvider`
///
/// Holds a shared `reqwest::Client` (connection pooling) and the provider
/// configuration captured at start-up.
#[derive(Debug, Clone)]
pub struct AdobeSignClient {
    http: reqwest::Client,
    config: ProviderConfig,
}

impl AdobeSignClient {
    /// Create a client from the shared HTTP client and provider configuration
    pub fn new(http: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            http,
            config: config.clone(),
        }
    }

    /// Build `{api_base}/agreements/{segments...}` with each segment percent-encoded
    fn agreements_url(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| ProviderError::InvalidUrl(format!("{}: {}", self.config.api_base, e)))?;
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ProviderError::InvalidUrl(self.config.api_base.clone()))?;
            path.pop_if_empty().push("agreements");
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.config.access_token)
            .header(header::ACCEPT, "application/json")
    }

    fn creation_info(&self, signer: &SignerInfo) -> AgreementCreationInfo {
        AgreementCreationInfo {
            file_infos: vec![FileInfo {
                library_document_id: self.config.template_id.clone(),
            }],
            name: format!("Agreement for {}", signer.name),
            participant_sets_info: vec![ParticipantSetInfo {
                member_infos: vec![MemberInfo {
                    email: signer.email.clone(),
                }],
                order: 1,
                role: ROLE_SIGNER.to_string(),
            }],
            merge_field_info: vec![
                MergeFieldInfo {
                    field_name: "name".to_string(),
                    default_value: signer.name.clone(),
                },
                MergeFieldInfo {
                    field_name: "email".to_string(),
                    default_value: signer.email.clone(),
                },
            ],
            signature_type: SIGNATURE_TYPE_ESIGN.to_string(),
            state: AgreementState::Draft.as_str().to_string(),
            post_sign_redirect_url: self.config.post_sign_redirect_url(),
        }
    }
}

/// Send a request and read the whole body as text
async fn send(request: RequestBuilder) -> Result<(StatusCode, String), ProviderError> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok((status, body))
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::InvalidJson(e.to_string()))
}

/// Turn a non-2xx response into `ProviderError::Api`, keeping code/message if present
fn api_error(status: StatusCode, body: &str) -> ProviderError {
    let parsed: ApiErrorBody = serde_json::from_str(body).unwrap_or_default();
    tracing::error!(
        status_code = status.as_u16(),
        code = ?parsed.code,
        message = ?parsed.message,
        "Provider returned error status"
    );
    ProviderError::Api {
        status: status.as_u16(),
        code: parsed.code,
        message: parsed.message,
    }
}

#[async_trait]
impl AgreementProvider for AdobeSignClient {
    async fn create_agreement(&self, signer: &SignerInfo) -> Result<AgreementId, ProviderError> {
        let url = self.agreements_url(&[])?;
        tracing::debug!(url = %url, "Creating agreement");

        let (status, body) =
            send(self.request(Method::POST, url).json(&self.creation_info(signer))).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let created: AgreementCreationResponse = parse_json(&body)?;
        let agreement_id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or(ProviderError::MissingField("id"))?;

        tracing::info!(agreement_id = %agreement_id, "Agreement created");
        Ok(agreement_id)
    }

    async fn set_state(
        &self,
        agreement_id: &str,
        state: AgreementState,
    ) -> Result<(), ProviderError> {
        let url = self.agreements_url(&[agreement_id, "state"])?;
        let payload = AgreementStateInfo {
            state: state.as_str().to_string(),
        };

        let (status, body) = send(self.request(Method::PUT, url).json(&payload)).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        // Success bodies are usually empty; anything else is only worth a log line.
        if !body.trim().is_empty() && serde_json::from_str::<serde_json::Value>(&body).is_err() {
            tracing::warn!(
                agreement_id = %agreement_id,
                body_len = body.len(),
                "State change returned a non-JSON body, ignoring"
            );
        }

        tracing::info!(agreement_id = %agreement_id, state = %state, "Agreement state changed");
        Ok(())
    }

    async fn get_signing_urls(&self, agreement_id: &str) -> Result<SigningUrlResult, ProviderError> {
        let url = self.agreements_url(&[agreement_id, "signingUrls"])?;
        let (status, body) = send(self.request(Method::GET, url)).await?;

        // The not-exposed code is meaningful whatever the HTTP status is.
        if let Ok(err) = serde_json::from_str::<ApiErrorBody>(&body) {
            if err.code.as_deref() == Some(AGREEMENT_NOT_EXPOSED) {
                tracing::debug!(agreement_id = %agreement_id, "Agreement not exposed yet");
                return Ok(SigningUrlResult::NotExposed);
            }
        }
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let parsed: SigningUrlResponse = parse_json(&body)?;
        tracing::debug!(
            agreement_id = %agreement_id,
            url_sets = parsed.signing_url_set_infos.len(),
            "Fetched signing URLs"
        );
        Ok(SigningUrlResult::Ready(parsed.signing_url_set_infos))
    }

    async fn get_status(&self, agreement_id: &str) -> Result<String, ProviderError> {
        let url = self.agreements_url(&[agreement_id])?;
        let (status, body) = send(self.request(Method::GET, url)).await?;
        if !status.is_success() {
            return Err(api_error(status, &body));
        }

        let info: AgreementInfo = parse_json(&body)?;
        info.status.ok_or(ProviderError::MissingField("status"))
    }
}
