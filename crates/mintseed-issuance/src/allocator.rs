//! Initial supply allocation.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use mintseed_core::{HoldingAccount, IntentId, Receipt, SupplyAllocation};
use mintseed_ledger::{LedgerClient, LedgerError, LedgerKeypair, RetryPolicy, TxIntent};

use crate::error::{IssuanceError, IssuanceResult};

/// Mints supply into a holding account, authorized by the mint authority.
///
/// Minting is not idempotent, so a failed round is never blindly
/// resubmitted. Before any retry the ledger is asked for a confirmed
/// transaction carrying this allocation's intent ID:
/// - ack lost at submit: a hit cannot be attributed with certainty and is
///   reported as ambiguous; only a definitive miss permits a resubmit
/// - ack received but confirmation timed out: a hit matching the known
///   transaction signature is established confirmation; anything else is
///   ambiguous because the original may still land
pub struct SupplyAllocator {
    ledger: Arc<dyn LedgerClient>,
    retry: RetryPolicy,
    confirm_timeout: Duration,
    reconcile_window: Duration,
}

impl SupplyAllocator {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        retry: RetryPolicy,
        confirm_timeout: Duration,
        reconcile_window: Duration,
    ) -> Self {
        Self {
            ledger,
            retry,
            confirm_timeout,
            reconcile_window,
        }
    }

    /// Mint `amount` base units into `destination`.
    ///
    /// `amount` must already be expressed in base units consistent with
    /// the asset's precision; this component does not reinterpret units.
    ///
    /// # Errors
    /// `InvalidParameter` for a zero amount, `Ledger` for definitive
    /// failures, `Ambiguous` when the mint's outcome could not be
    /// established.
    pub async fn allocate(
        &self,
        destination: &HoldingAccount,
        amount: u64,
        authority: &LedgerKeypair,
    ) -> IssuanceResult<SupplyAllocation> {
        if amount == 0 {
            return Err(IssuanceError::InvalidParameter(
                "allocation amount must be positive".to_string(),
            ));
        }

        let intent_id = IntentId::new();
        let mut attempt = 1u32;
        loop {
            let intent = TxIntent::MintTo {
                intent: intent_id.clone(),
                destination: destination.address.clone(),
                amount,
                authority: authority.address().clone(),
            };

            match self.ledger.submit(intent, authority).await {
                Ok(handle) => {
                    return match self.ledger.confirm(&handle, self.confirm_timeout).await {
                        Ok(receipt) => Ok(self.allocation(destination, amount, &intent_id, receipt)),
                        Err(LedgerError::ConfirmTimeout { signature }) => {
                            self.resolve_timed_out(destination, amount, &intent_id, &signature)
                                .await
                        }
                        Err(other) => Err(other.into()),
                    };
                }
                Err(LedgerError::Unreachable(reason)) => {
                    match self.ledger.lookup_intent(&intent_id, self.reconcile_window).await {
                        Ok(Some(receipt)) => {
                            return Err(IssuanceError::Ambiguous {
                                intent: intent_id,
                                reason: format!(
                                    "submission ack was lost but a confirmed transaction \
                                     {} matches this allocation; verify before re-running",
                                    receipt.signature
                                ),
                            });
                        }
                        Ok(None) => {
                            if attempt >= self.retry.max_attempts {
                                return Err(LedgerError::Unreachable(reason).into());
                            }
                            let delay = self.retry.delay(attempt);
                            warn!(
                                intent = %intent_id,
                                attempt,
                                delay_ms = delay.as_millis() as u64,
                                %reason,
                                "Mint submission unreachable; no prior transaction found, retrying"
                            );
                            tokio::time::sleep(delay).await;
                            attempt += 1;
                        }
                        Err(lookup_err) => {
                            return Err(IssuanceError::Ambiguous {
                                intent: intent_id,
                                reason: format!(
                                    "submission state unknown and reconciliation \
                                     unavailable: {lookup_err}"
                                ),
                            });
                        }
                    }
                }
                Err(other) => return Err(other.into()),
            }
        }
    }

    async fn resolve_timed_out(
        &self,
        destination: &HoldingAccount,
        amount: u64,
        intent_id: &IntentId,
        signature: &str,
    ) -> IssuanceResult<SupplyAllocation> {
        match self.ledger.lookup_intent(intent_id, self.reconcile_window).await {
            Ok(Some(receipt)) if receipt.signature == signature => {
                Ok(self.allocation(destination, amount, intent_id, receipt))
            }
            Ok(_) => Err(IssuanceError::Ambiguous {
                intent: intent_id.clone(),
                reason: format!(
                    "transaction {signature} unconfirmed at deadline and not yet \
                     visible; it may still land"
                ),
            }),
            Err(lookup_err) => Err(IssuanceError::Ambiguous {
                intent: intent_id.clone(),
                reason: format!(
                    "transaction {signature} unconfirmed and reconciliation \
                     unavailable: {lookup_err}"
                ),
            }),
        }
    }

    fn allocation(
        &self,
        destination: &HoldingAccount,
        amount: u64,
        intent_id: &IntentId,
        receipt: Receipt,
    ) -> SupplyAllocation {
        info!(
            destination = %destination.address,
            amount,
            signature = %receipt.signature,
            "Supply allocated"
        );
        SupplyAllocation {
            receipt,
            destination: destination.address.clone(),
            amount,
            intent: intent_id.clone(),
        }
    }
}
