//! Error types for mintseed-core.

use thiserror::Error;

/// Core error types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid precision: {0} exceeds ledger maximum of {1}")]
    InvalidPrecision(u8, u8),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid slippage bound: {0}")]
    InvalidSlippage(String),
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
