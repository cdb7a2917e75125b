//! Shared handler state
//!
//! Holds no per-request data: just the provider handle and the settle
//! policy, both fixed at start-up.

use crate::orchestrator::SettlePolicy;
use crate::provider::AgreementProvider;
use std::sync::Arc;

/// State handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// Provider used for all outbound calls
    pub provider: Arc<dyn AgreementProvider>,
    /// Timing of the signing URL fetch
    pub settle: SettlePolicy,
}

impl AppState {
    /// Create state around a provider implementation
    pub fn new(provider: Arc<dyn AgreementProvider>, settle: SettlePolicy) -> Self {
        Self { provider, settle }
    }
}
