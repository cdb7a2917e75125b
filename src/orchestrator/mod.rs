//! Orchestrator module
//!
//! Sequences provider calls into the two operations the HTTP surface
//! exposes: creating a signing session and checking agreement status.

pub mod session;
pub mod status;

pub use session::{create_signing_session, SessionError, SettlePolicy, SigningSession};
pub use status::{check_status, AgreementStatusReport};
