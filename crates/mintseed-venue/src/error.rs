//! Venue adapter error types.

use thiserror::Error;

use mintseed_core::FaultKind;
use mintseed_ledger::LedgerError;

/// Errors from venue adapters.
#[derive(Debug, Error)]
pub enum VenueError {
    /// Configured market or pool does not exist. Configuration error, not
    /// transient; never retried.
    #[error("Venue not found: {0}")]
    NotFound(String),

    /// Venue reported price movement beyond the submitted bound.
    #[error("Slippage bound exceeded: {0}")]
    SlippageExceeded(String),

    /// No reference price could be established for quoting.
    #[error("No reference price: {0}")]
    NoReferencePrice(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl VenueError {
    /// Classification for pipeline reporting.
    #[must_use]
    pub fn fault_kind(&self) -> FaultKind {
        match self {
            Self::NotFound(_) => FaultKind::VenueNotFound,
            Self::SlippageExceeded(_) => FaultKind::SlippageExceeded,
            Self::NoReferencePrice(_) => FaultKind::InvalidParameter,
            Self::Ledger(LedgerError::Unreachable(_)) => FaultKind::LedgerUnreachable,
            Self::Ledger(LedgerError::Rejected { .. }) => FaultKind::LedgerRejected,
            Self::Ledger(LedgerError::ConfirmTimeout { .. }) => FaultKind::AmbiguousOutcome,
            Self::Ledger(LedgerError::Encoding(_)) => FaultKind::InvalidParameter,
        }
    }

    /// Fold a ledger error into the venue taxonomy, promoting the
    /// rejection kinds this adapter must surface distinctly.
    #[must_use]
    pub fn from_ledger(err: LedgerError) -> Self {
        use mintseed_ledger::RejectKind;
        match err.reject_kind() {
            Some(RejectKind::SlippageExceeded) => Self::SlippageExceeded(err.to_string()),
            Some(RejectKind::NotFound) => Self::NotFound(err.to_string()),
            _ => Self::Ledger(err),
        }
    }
}

/// Result type alias for venue operations.
pub type VenueResult<T> = std::result::Result<T, VenueError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mintseed_ledger::RejectKind;

    #[test]
    fn slippage_rejection_promotes_to_slippage_exceeded() {
        let err = VenueError::from_ledger(LedgerError::Rejected {
            kind: RejectKind::SlippageExceeded,
            message: "moved 2.3%".into(),
        });
        assert!(matches!(err, VenueError::SlippageExceeded(_)));
        assert_eq!(err.fault_kind(), FaultKind::SlippageExceeded);
    }

    #[test]
    fn generic_rejection_stays_ledger_rejected() {
        let err = VenueError::from_ledger(LedgerError::Rejected {
            kind: RejectKind::Other,
            message: "refused".into(),
        });
        assert_eq!(err.fault_kind(), FaultKind::LedgerRejected);
    }
}
