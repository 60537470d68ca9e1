//! Issuance step error types.

use thiserror::Error;

use mintseed_core::{FaultKind, IntentId};
use mintseed_ledger::LedgerError;

/// Errors from the issuance step components.
#[derive(Debug, Error)]
pub enum IssuanceError {
    /// Caller input failed local validation; no ledger call was made.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// The outcome of a non-idempotent call could not be established.
    /// Requires manual reconciliation against the ledger.
    #[error("Ambiguous outcome for {intent}: {reason}")]
    Ambiguous { intent: IntentId, reason: String },
}

impl IssuanceError {
    /// Classification for pipeline reporting.
    #[must_use]
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            Self::InvalidParameter(_) => FaultKind::InvalidParameter,
            Self::Ledger(LedgerError::Unreachable(_)) => FaultKind::LedgerUnreachable,
            Self::Ledger(LedgerError::Rejected { .. }) => FaultKind::LedgerRejected,
            Self::Ledger(LedgerError::ConfirmTimeout { .. }) => FaultKind::AmbiguousOutcome,
            Self::Ledger(LedgerError::Encoding(_)) => FaultKind::InvalidParameter,
            Self::Ambiguous { .. } => FaultKind::AmbiguousOutcome,
        }
    }
}

/// Result type alias for issuance operations.
pub type IssuanceResult<T> = std::result::Result<T, IssuanceError>;
