//! Asset class creation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use mintseed_core::{AssetDescriptor, IntentId};
use mintseed_ledger::{
    retrying, LedgerClient, LedgerError, LedgerKeypair, RejectKind, RetryPolicy, TxIntent,
};

use crate::error::{IssuanceError, IssuanceResult};

/// Creates a new asset class (mint) with fixed decimal precision.
///
/// Asset creation is not idempotent: a rejected transaction is never
/// retried (a blind retry would create a second, distinct asset), and a
/// confirmation timeout is surfaced as ambiguous rather than resubmitted.
/// Only submit-phase transport failures, where nothing was created, are
/// retried with backoff.
pub struct AssetIssuer {
    ledger: Arc<dyn LedgerClient>,
    retry: RetryPolicy,
    confirm_timeout: Duration,
}

impl AssetIssuer {
    pub fn new(ledger: Arc<dyn LedgerClient>, retry: RetryPolicy, confirm_timeout: Duration) -> Self {
        Self {
            ledger,
            retry,
            confirm_timeout,
        }
    }

    /// Create an asset class with the given precision, authorized and
    /// owned by `authority`.
    ///
    /// # Errors
    /// `InvalidParameter` for out-of-range precision (no ledger call is
    /// made), `Ledger` for submission failures, `Ambiguous` when the
    /// creation could not be confirmed before the deadline.
    pub async fn issue(
        &self,
        precision: u8,
        authority: &LedgerKeypair,
    ) -> IssuanceResult<AssetDescriptor> {
        AssetDescriptor::check_precision(precision)
            .map_err(|e| IssuanceError::InvalidParameter(e.to_string()))?;

        let intent_id = IntentId::new();
        let handle = retrying(self.retry, "createAsset", || {
            self.ledger.submit(
                TxIntent::CreateAsset {
                    intent: intent_id.clone(),
                    precision,
                    authority: authority.address().clone(),
                },
                authority,
            )
        })
        .await?;

        let mint = handle.created.clone().ok_or_else(|| {
            IssuanceError::Ledger(LedgerError::Rejected {
                kind: RejectKind::Other,
                message: "acknowledgement missing the created mint address".to_string(),
            })
        })?;

        match self.ledger.confirm(&handle, self.confirm_timeout).await {
            Ok(receipt) => {
                info!(mint = %mint, precision, slot = receipt.slot, "Asset class created");
                Ok(AssetDescriptor {
                    mint,
                    precision,
                    authority: authority.address().clone(),
                })
            }
            Err(LedgerError::ConfirmTimeout { signature }) => {
                warn!(mint = %mint, %signature, "Asset creation unconfirmed at deadline");
                Err(IssuanceError::Ambiguous {
                    intent: intent_id,
                    reason: format!(
                        "creation transaction {signature} unconfirmed at deadline; \
                         the asset may or may not exist"
                    ),
                })
            }
            Err(other) => Err(other.into()),
        }
    }
}
