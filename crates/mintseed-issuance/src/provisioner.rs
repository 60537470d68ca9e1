//! Holding account provisioning.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use mintseed_core::{Address, AssetDescriptor, HoldingAccount, IntentId};
use mintseed_ledger::{
    retrying, LedgerClient, LedgerError, LedgerKeypair, RejectKind, RetryPolicy, TxIntent,
};

use crate::error::{IssuanceError, IssuanceResult};

/// Ensures the canonical holding account for (owner, asset) exists.
///
/// Get-or-create as one logical operation: a lookup, then a conditional
/// create. Concurrent callers for the same pair may race; the
/// created-by-someone-else outcome is success, not a failure.
pub struct AccountProvisioner {
    ledger: Arc<dyn LedgerClient>,
    retry: RetryPolicy,
    confirm_timeout: Duration,
}

impl AccountProvisioner {
    pub fn new(ledger: Arc<dyn LedgerClient>, retry: RetryPolicy, confirm_timeout: Duration) -> Self {
        Self {
            ledger,
            retry,
            confirm_timeout,
        }
    }

    /// Return the canonical holding account for (owner, asset), creating
    /// it if absent.
    ///
    /// # Errors
    /// `Ledger` for transport failures that outlast the retry budget and
    /// for rejections other than already-exists; `Ambiguous` when a
    /// creation was submitted but neither confirmation nor a subsequent
    /// lookup could establish the account.
    pub async fn ensure_account(
        &self,
        owner: &Address,
        asset: &AssetDescriptor,
        payer: &LedgerKeypair,
    ) -> IssuanceResult<HoldingAccount> {
        let address = self.ledger.holding_address(owner, &asset.mint);
        let account = HoldingAccount {
            address: address.clone(),
            owner: owner.clone(),
            asset: asset.mint.clone(),
        };

        if self.exists(&address).await? {
            debug!(account = %address, "Holding account already present");
            return Ok(account);
        }

        let intent_id = IntentId::new();
        let submitted = retrying(self.retry, "createAccount", || {
            self.ledger.submit(
                TxIntent::CreateAccount {
                    intent: intent_id.clone(),
                    owner: owner.clone(),
                    asset: asset.mint.clone(),
                },
                payer,
            )
        })
        .await;

        let handle = match submitted {
            Ok(handle) => handle,
            // Lost the creation race at submission: the account is there.
            Err(LedgerError::Rejected {
                kind: RejectKind::AlreadyExists,
                ..
            }) => {
                debug!(account = %address, "Holding account created concurrently");
                return Ok(account);
            }
            Err(other) => return Err(other.into()),
        };

        match self.ledger.confirm(&handle, self.confirm_timeout).await {
            Ok(receipt) => {
                info!(account = %address, slot = receipt.slot, "Holding account created");
                Ok(account)
            }
            Err(LedgerError::Rejected {
                kind: RejectKind::AlreadyExists,
                ..
            }) => {
                debug!(account = %address, "Holding account created concurrently");
                Ok(account)
            }
            // Creation is idempotent per (owner, asset): an unconfirmed
            // transaction is resolved by looking for the account itself.
            Err(LedgerError::ConfirmTimeout { signature }) => {
                if self.exists(&address).await? {
                    Ok(account)
                } else {
                    Err(IssuanceError::Ambiguous {
                        intent: intent_id,
                        reason: format!(
                            "creation transaction {signature} unconfirmed and account not \
                             yet visible"
                        ),
                    })
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn exists(&self, address: &Address) -> IssuanceResult<bool> {
        let view = retrying(self.retry, "getAccount", || self.ledger.get_account(address)).await?;
        Ok(view.is_some())
    }
}
