//! AMM pool liquidity seeding.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use mintseed_core::{Address, IntentId, VenueKind, VenueSeed};
use mintseed_ledger::{
    retrying, BoxFuture, LedgerClient, LedgerKeypair, RetryPolicy, TxIntent,
};

use crate::adapter::{SeedOutcome, VenueAdapter};
use crate::error::{VenueError, VenueResult};

/// Seeds liquidity into an automated market maker pool.
///
/// The slippage bound is passed through; enforcement is venue-side, and a
/// slippage-classified rejection is surfaced distinctly from a generic
/// one. The liquidity-provision submission itself is never retried: adding
/// liquidity twice is a real loss, and only the read-side existence check
/// is retry-safe.
pub struct PoolVenue {
    ledger: Arc<dyn LedgerClient>,
    pool: Address,
    retry: RetryPolicy,
    confirm_timeout: Duration,
}

impl PoolVenue {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        pool: Address,
        retry: RetryPolicy,
        confirm_timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            pool,
            retry,
            confirm_timeout,
        }
    }

    async fn seed_inner(
        &self,
        seed: &VenueSeed,
        payer: &LedgerKeypair,
    ) -> VenueResult<SeedOutcome> {
        let pool = retrying(self.retry, "getAccount", || self.ledger.get_account(&self.pool))
            .await
            .map_err(VenueError::from_ledger)?;
        if pool.is_none() {
            return Err(VenueError::NotFound(format!(
                "pool {} does not exist on the ledger",
                self.pool
            )));
        }

        let intent = TxIntent::AddLiquidity {
            intent: IntentId::new(),
            pool: self.pool.clone(),
            asset: seed.asset.mint.clone(),
            amount: seed.amount,
            slippage_pct: seed.slippage_pct,
        };
        let handle = self
            .ledger
            .submit(intent, payer)
            .await
            .map_err(VenueError::from_ledger)?;
        let receipt = self
            .ledger
            .confirm(&handle, self.confirm_timeout)
            .await
            .map_err(VenueError::from_ledger)?;

        info!(
            pool = %self.pool,
            symbol = %seed.symbol,
            amount = seed.amount,
            signature = %receipt.signature,
            "Liquidity provided to pool"
        );
        Ok(SeedOutcome::Pool { receipt })
    }
}

impl VenueAdapter for PoolVenue {
    fn kind(&self) -> VenueKind {
        VenueKind::Pool
    }

    fn seed<'a>(
        &'a self,
        seed: &'a VenueSeed,
        payer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, VenueResult<SeedOutcome>> {
        Box::pin(self.seed_inner(seed, payer))
    }
}
