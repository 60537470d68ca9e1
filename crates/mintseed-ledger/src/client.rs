//! The `LedgerClient` capability trait.
//!
//! Object-safe async trait over the ledger gateway, using boxed futures so
//! the pipeline can hold an `Arc<dyn LedgerClient>` and tests can inject
//! in-memory implementations.

use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mintseed_core::{Address, IntentId, Receipt};

use crate::error::LedgerResult;
use crate::intent::TxIntent;
use crate::keypair::LedgerKeypair;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Handle for a submitted, not-yet-confirmed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingHandle {
    /// Transaction signature assigned at submission.
    pub signature: String,
    /// Logical request identifier the transaction carries.
    pub intent: IntentId,
    /// Ledger-assigned address for creation intents (new mint, new
    /// account); absent for other intent kinds.
    pub created: Option<Address>,
    /// Time the submission was acknowledged.
    pub submitted_at: DateTime<Utc>,
}

/// Read view of a ledger account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountView {
    pub address: Address,
    /// Owning identity, when the account kind has one.
    pub owner: Option<Address>,
}

/// One price level of an order book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub size: u64,
}

/// Snapshot of an order-book market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketState {
    /// Bids, best first.
    pub bids: Vec<BookLevel>,
    /// Asks, best first.
    pub asks: Vec<BookLevel>,
    /// Whether the market accepts batched order placement.
    pub supports_batching: bool,
}

impl MarketState {
    /// Mid price from the best bid and ask. None when either side is empty.
    #[must_use]
    pub fn mid_price(&self) -> Option<Decimal> {
        let bid = self.bids.first()?.price;
        let ask = self.asks.first()?.price;
        Some((bid + ask) / Decimal::TWO)
    }
}

/// Capability for submitting and confirming transactions against the
/// distributed ledger.
///
/// Implementations must be safe for concurrent use: independent pipelines
/// share one client.
pub trait LedgerClient: Send + Sync {
    /// Deterministic canonical holding-account address for (owner, asset).
    fn holding_address(&self, owner: &Address, asset: &Address) -> Address;

    /// Encode, sign, and submit an intent. Resolves once the ledger
    /// acknowledges the submission, not once it executes.
    fn submit<'a>(
        &'a self,
        intent: TxIntent,
        signer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, LedgerResult<PendingHandle>>;

    /// Poll until the transaction reaches a final state or the deadline
    /// passes.
    fn confirm<'a>(
        &'a self,
        handle: &'a PendingHandle,
        timeout: Duration,
    ) -> BoxFuture<'a, LedgerResult<Receipt>>;

    /// Fetch an account, `None` when it does not exist.
    fn get_account<'a>(
        &'a self,
        address: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<AccountView>>>;

    /// Fetch an order-book snapshot, `None` when the market does not exist.
    fn get_market_state<'a>(
        &'a self,
        market: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<MarketState>>>;

    /// Look for a confirmed transaction carrying the given intent ID within
    /// the reconciliation window. `Ok(None)` means definitively absent.
    fn lookup_intent<'a>(
        &'a self,
        intent: &'a IntentId,
        window: Duration,
    ) -> BoxFuture<'a, LedgerResult<Option<Receipt>>>;
}
