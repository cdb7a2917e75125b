//! Agreement status lookup
//!
//! Stateless read path used by the signing page to poll for completion.

use crate::provider::{AgreementProvider, ProviderError, STATUS_SIGNED};
use serde::Serialize;

/// Current status of an agreement
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgreementStatusReport {
    /// Provider status value, passed through unchanged
    pub status: String,
    /// `true` only when `status` is `SIGNED`
    pub is_signed: bool,
}

impl AgreementStatusReport {
    /// Build a report from a raw provider status
    pub fn from_status(status: String) -> Self {
        let is_signed = status == STATUS_SIGNED;
        Self { status, is_signed }
    }
}

/// Fetch the agreement status from the provider
pub async fn check_status(
    provider: &dyn AgreementProvider,
    agreement_id: &str,
) -> Result<AgreementStatusReport, ProviderError> {
    let status = provider.get_status(agreement_id).await?;
    tracing::debug!(agreement_id = %agreement_id, status = %status, "Checked agreement status");
    Ok(AgreementStatusReport::from_status(status))
}
