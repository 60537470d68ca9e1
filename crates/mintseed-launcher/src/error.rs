//! Application error types.

use thiserror::Error;

use mintseed_ledger::KeyError;

/// Errors raised before the pipeline runs: configuration and identity
/// loading. Step failures are not errors at this level; they live in the
/// `PipelineReport`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// Result type alias for application setup.
pub type AppResult<T> = std::result::Result<T, AppError>;
