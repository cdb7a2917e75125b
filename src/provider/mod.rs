//! E-signature provider module
//!
//! The `AgreementProvider` trait is the seam between the orchestration
//! logic and the outbound REST calls. `AdobeSignClient` is the production
//! implementation; tests substitute scripted fakes.

pub mod adobe_types;
pub mod client;
pub mod error;

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;

pub use adobe_types::{SigningUrl, SigningUrlSetInfo};
pub use client::AdobeSignClient;
pub use error::ProviderError;

/// Provider-assigned agreement identifier
pub type AgreementId = String;

/// Status value reported once the signer has completed the agreement
pub const STATUS_SIGNED: &str = "SIGNED";

/// Signer details supplied by the caller
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SignerInfo {
    /// Signer display name, also used as a merge field
    pub name: String,
    /// Signer email, also used as a merge field
    pub email: String,
}

/// Agreement states this service requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgreementState {
    /// Freshly created, not yet visible to participants
    Draft,
    /// Sent out for signing
    InProcess,
}

impl AgreementState {
    /// Provider wire value
    pub fn as_str(&self) -> &'static str {
        match self {
            AgreementState::Draft => "DRAFT",
            AgreementState::InProcess => "IN_PROCESS",
        }
    }
}

impl fmt::Display for AgreementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a signing URL lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningUrlResult {
    /// URL sets as returned by the provider (possibly empty)
    Ready(Vec<SigningUrlSetInfo>),
    /// Provider reported `AGREEMENT_NOT_EXPOSED`
    NotExposed,
}

/// Outbound operations against the e-signature provider
#[async_trait]
pub trait AgreementProvider: Send + Sync {
    /// Create a DRAFT agreement from the configured template for `signer`
    async fn create_agreement(&self, signer: &SignerInfo) -> Result<AgreementId, ProviderError>;

    /// Request a state transition; an empty success body is not an error
    async fn set_state(
        &self,
        agreement_id: &str,
        state: AgreementState,
    ) -> Result<(), ProviderError>;

    /// Fetch the hosted signing URLs
    async fn get_signing_urls(&self, agreement_id: &str) -> Result<SigningUrlResult, ProviderError>;

    /// Fetch the current agreement status string
    async fn get_status(&self, agreement_id: &str) -> Result<String, ProviderError>;
}
