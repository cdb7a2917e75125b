//! Signing session orchestration
//!
//! Drives the provider from signer details to a hosted signing URL:
//! create the agreement, send it (`IN_PROCESS`), let the provider settle,
//! then fetch the signing URL.
//!
//! Nothing is compensated on failure: once the create call succeeds the
//! agreement stays in the provider even if a later step fails.

use crate::provider::{
    AgreementId, AgreementProvider, AgreementState, ProviderError, SignerInfo, SigningUrlResult,
    SigningUrlSetInfo,
};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Timing of the signing URL fetch after the state transition
///
/// The provider processes the `IN_PROCESS` transition asynchronously, so the
/// first fetch waits `initial_delay`. While the provider answers
/// `AGREEMENT_NOT_EXPOSED` the fetch is repeated up to `max_attempts` times,
/// sleeping `backoff`, `2 * backoff`, `4 * backoff`... in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Wait before the first fetch
    pub initial_delay: Duration,
    /// Total fetch attempts (values below 1 count as 1)
    pub max_attempts: u32,
    /// Wait before the second attempt, doubled for each further one
    pub backoff: Duration,
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(3),
            max_attempts: 3,
            backoff: Duration::from_secs(1),
        }
    }
}

impl SettlePolicy {
    /// A single fetch after a fixed delay, no retries
    pub fn fixed(delay: Duration) -> Self {
        Self {
            initial_delay: delay,
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    /// Wait before attempt `attempt + 1`, where `attempt` is 1-based
    fn backoff_after(&self, attempt: u32) -> Duration {
        self.backoff
            .saturating_mul(2u32.saturating_pow(attempt.saturating_sub(1)))
    }
}

/// A signing URL ready to hand to the signer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningSession {
    /// Hosted, single-use signing URL
    pub signing_url: String,
    /// Provider-assigned agreement id, used later for status polling
    pub agreement_id: AgreementId,
}

/// Failures of `create_signing_session`
///
/// The `Display` text of each variant is the message returned to the caller.
#[derive(Error, Debug)]
pub enum SessionError {
    /// The agreement could not be created
    #[error("Error creating agreement")]
    Create(#[source] ProviderError),

    /// A provider call failed after the agreement was created
    #[error("Error creating agreement")]
    Provider {
        /// Agreement left behind in the provider
        agreement_id: AgreementId,
        /// Underlying provider failure
        #[source]
        source: ProviderError,
    },

    /// The provider has not exposed the agreement to the signer yet
    #[error("Agreement is not ready for signing yet. Please try again in a moment.")]
    NotExposed {
        /// Agreement that was not exposed in time
        agreement_id: AgreementId,
    },

    /// No URL sets, or the first set holds no URLs
    #[error("No signing URLs were generated")]
    NoSigningUrls {
        /// Agreement without URLs
        agreement_id: AgreementId,
    },

    /// The first URL entry has an empty or absent link
    #[error("Failed to get signing URL")]
    MissingSigningUrl {
        /// Agreement whose URL was empty
        agreement_id: AgreementId,
    },
}

impl SessionError {
    /// Whether the caller should simply try again shortly
    pub fn is_retryable(&self) -> bool {
        matches!(self, SessionError::NotExposed { .. })
    }

    /// Agreement created before the failure, if any
    pub fn agreement_id(&self) -> Option<&str> {
        match self {
            SessionError::Create(_) => None,
            SessionError::Provider { agreement_id, .. }
            | SessionError::NotExposed { agreement_id }
            | SessionError::NoSigningUrls { agreement_id }
            | SessionError::MissingSigningUrl { agreement_id } => Some(agreement_id),
        }
    }
}

/// Create an agreement for `signer` and return its signing URL
///
/// # Flow
/// 1. Create the agreement from the template (state `DRAFT`)
/// 2. Transition it to `IN_PROCESS`
/// 3. Wait for the provider to settle, per `policy`
/// 4. Fetch signing URLs and pick the first URL of the first set
///
/// # Errors
/// See `SessionError`; every variant except `Create` leaves an agreement behind.
pub async fn create_signing_session(
    provider: &dyn AgreementProvider,
    policy: &SettlePolicy,
    signer: &SignerInfo,
) -> Result<SigningSession, SessionError> {
    let agreement_id = provider
        .create_agreement(signer)
        .await
        .map_err(SessionError::Create)?;

    let result = expose_and_fetch(provider, policy, &agreement_id).await;
    if let Err(e) = &result {
        tracing::warn!(
            agreement_id = %agreement_id,
            error = %e,
            retryable = e.is_retryable(),
            "Signing session failed after agreement creation; agreement left in provider"
        );
    }
    result
}

async fn expose_and_fetch(
    provider: &dyn AgreementProvider,
    policy: &SettlePolicy,
    agreement_id: &str,
) -> Result<SigningSession, SessionError> {
    provider
        .set_state(agreement_id, AgreementState::InProcess)
        .await
        .map_err(|source| SessionError::Provider {
            agreement_id: agreement_id.to_string(),
            source,
        })?;

    tokio::time::sleep(policy.initial_delay).await;

    let sets = fetch_signing_urls(provider, policy, agreement_id).await?;
    let signing_url = first_signing_url(&sets, agreement_id)?;

    tracing::info!(agreement_id = %agreement_id, "Signing session ready");
    Ok(SigningSession {
        signing_url,
        agreement_id: agreement_id.to_string(),
    })
}

/// Bounded retry on `AGREEMENT_NOT_EXPOSED`; any other outcome ends the loop
async fn fetch_signing_urls(
    provider: &dyn AgreementProvider,
    policy: &SettlePolicy,
    agreement_id: &str,
) -> Result<Vec<SigningUrlSetInfo>, SessionError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        let result = provider
            .get_signing_urls(agreement_id)
            .await
            .map_err(|source| SessionError::Provider {
                agreement_id: agreement_id.to_string(),
                source,
            })?;

        match result {
            SigningUrlResult::Ready(sets) => return Ok(sets),
            SigningUrlResult::NotExposed if attempt < max_attempts => {
                let wait = policy.backoff_after(attempt);
                tracing::debug!(
                    agreement_id = %agreement_id,
                    attempt = attempt,
                    wait_ms = wait.as_millis() as u64,
                    "Agreement not exposed yet, retrying"
                );
                tokio::time::sleep(wait).await;
                attempt += 1;
            }
            SigningUrlResult::NotExposed => {
                return Err(SessionError::NotExposed {
                    agreement_id: agreement_id.to_string(),
                })
            }
        }
    }
}

fn first_signing_url(
    sets: &[SigningUrlSetInfo],
    agreement_id: &str,
) -> Result<String, SessionError> {
    let first = sets
        .first()
        .and_then(|set| set.signing_urls.first())
        .ok_or_else(|| SessionError::NoSigningUrls {
            agreement_id: agreement_id.to_string(),
        })?;

    first
        .esign_url
        .as_deref()
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .ok_or_else(|| SessionError::MissingSigningUrl {
            agreement_id: agreement_id.to_string(),
        })
}
