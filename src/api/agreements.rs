//! Agreement API handlers
//!
//! `POST /createAgreement` runs the signing session flow;
//! `GET /checkAgreementStatus/:agreementId` polls the provider.

use crate::error::AppError;
use crate::orchestrator::{
    check_status, create_signing_session, AgreementStatusReport, SigningSession,
};
use crate::provider::SignerInfo;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::Json,
};

/// POST /createAgreement - Create an agreement and return its signing URL
///
/// # Returns
/// * `Ok(Json<SigningSession>)` - `{signingUrl, agreementId}`
/// * `Err(AppError)` - 500 with the message of the failing step
pub async fn create_agreement(
    State(state): State<AppState>,
    Json(signer): Json<SignerInfo>,
) -> Result<Json<SigningSession>, AppError> {
    tracing::debug!("Creating signing session");
    let session = create_signing_session(state.provider.as_ref(), &state.settle, &signer).await?;
    tracing::info!(agreement_id = %session.agreement_id, "Signing session created");
    Ok(Json(session))
}

/// GET /checkAgreementStatus/:agreementId - Current status of an agreement
pub async fn check_agreement_status(
    State(state): State<AppState>,
    Path(agreement_id): Path<String>,
) -> Result<Json<AgreementStatusReport>, AppError> {
    let report = check_status(state.provider.as_ref(), &agreement_id)
        .await
        .map_err(AppError::Status)?;
    Ok(Json(report))
}
