//! Runtime errors
//!
//! Two families share one type: claim rejections, which are user-facing and
//! recoverable, and infrastructure failures (ledger, clock, configuration),
//! which are fatal for the request and propagate to the top-level handler.

use crate::config::ConfigError;
use reserva_core::effects::{LedgerError, TimeError};
use reserva_core::ClaimError;

/// Error returned by runtime services
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Request rejected by the claim engine
    #[error(transparent)]
    Rejected(#[from] ClaimError),

    /// Ledger could not be read or written
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Clock could not be read
    #[error(transparent)]
    Time(#[from] TimeError),

    /// Configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl AgentError {
    /// Whether this is a user-facing claim rejection
    pub fn is_rejection(&self) -> bool {
        matches!(self, AgentError::Rejected(_))
    }

    /// The rejection, if this is one
    pub fn rejection(&self) -> Option<&ClaimError> {
        match self {
            AgentError::Rejected(err) => Some(err),
            _ => None,
        }
    }
}
