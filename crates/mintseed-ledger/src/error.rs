//! Ledger client error types.

use thiserror::Error;

/// Ledger-side rejection classification, parsed from gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectKind {
    /// The account or asset already exists. Account provisioning treats
    /// this as a lost race, not a failure.
    AlreadyExists,
    /// Realized price deviated beyond the submitted slippage bound.
    SlippageExceeded,
    /// Referenced market, pool, or account does not exist.
    NotFound,
    /// Payer balance insufficient for the transaction.
    InsufficientFunds,
    /// Any other ledger-side refusal.
    Other,
}

impl RejectKind {
    /// Parse a gateway error code into a classification.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "ALREADY_EXISTS" | "ACCOUNT_IN_USE" => Self::AlreadyExists,
            "SLIPPAGE_EXCEEDED" => Self::SlippageExceeded,
            "NOT_FOUND" | "MARKET_NOT_FOUND" | "POOL_NOT_FOUND" => Self::NotFound,
            "INSUFFICIENT_FUNDS" => Self::InsufficientFunds,
            _ => Self::Other,
        }
    }
}

/// Errors surfaced by a `LedgerClient`.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Transport-level failure: the ledger never acknowledged the call.
    /// Retry-eligible with bounded backoff.
    #[error("Ledger unreachable: {0}")]
    Unreachable(String),

    /// The ledger executed and refused the transaction. Never retried.
    #[error("Ledger rejected ({kind:?}): {message}")]
    Rejected { kind: RejectKind, message: String },

    /// Confirmation polling exhausted its deadline after a submission was
    /// acknowledged. The transaction may or may not have landed.
    #[error("Confirmation timed out for {signature}")]
    ConfirmTimeout { signature: String },

    /// Gateway payload could not be encoded or decoded.
    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl LedgerError {
    /// Whether the call may be retried without risking a duplicate effect
    /// on the ledger. Only transport failures before acknowledgement
    /// qualify; idempotency of the intent itself is the caller's concern.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unreachable(_))
    }

    /// Rejection classification, when this is a rejection.
    #[must_use]
    pub fn reject_kind(&self) -> Option<RejectKind> {
        match self {
            Self::Rejected { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

/// Result type alias for ledger operations.
pub type LedgerResult<T> = std::result::Result<T, LedgerError>;
