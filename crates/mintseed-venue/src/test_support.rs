//! Scripted in-memory ledger for venue adapter tests.

use std::collections::VecDeque;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;

use mintseed_core::{Address, IntentId, Receipt};
use mintseed_ledger::{
    AccountView, BoxFuture, LedgerClient, LedgerError, LedgerResult, LedgerKeypair, MarketState,
    PendingHandle, TxIntent,
};

/// Scripted outcome for one `submit` call.
pub enum SubmitScript {
    Ok { signature: String },
    Err(LedgerError),
}

#[derive(Default)]
pub struct MockState {
    pub submits: VecDeque<SubmitScript>,
    pub confirms: VecDeque<LedgerResult<Receipt>>,
    pub account_lookups: VecDeque<LedgerResult<Option<AccountView>>>,
    pub market_lookups: VecDeque<LedgerResult<Option<MarketState>>>,
    pub submitted: Vec<TxIntent>,
}

/// `LedgerClient` whose every response is scripted by the test.
#[derive(Default)]
pub struct MockLedger {
    pub state: Mutex<MockState>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn receipt(signature: &str, slot: u64) -> Receipt {
        Receipt {
            signature: signature.to_string(),
            slot,
            confirmed_at: Utc::now(),
        }
    }
}

impl LedgerClient for MockLedger {
    fn holding_address(&self, owner: &Address, asset: &Address) -> Address {
        Address::new(format!("held{owner}{asset}")).expect("test addresses stay short")
    }

    fn submit<'a>(
        &'a self,
        intent: TxIntent,
        _signer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, LedgerResult<PendingHandle>> {
        let mut state = self.state.lock();
        let intent_id = intent.intent_id().clone();
        state.submitted.push(intent);
        let script = state.submits.pop_front().expect("unscripted submit");
        let result = match script {
            SubmitScript::Ok { signature } => Ok(PendingHandle {
                signature,
                intent: intent_id,
                created: None,
                submitted_at: Utc::now(),
            }),
            SubmitScript::Err(err) => Err(err),
        };
        Box::pin(async move { result })
    }

    fn confirm<'a>(
        &'a self,
        _handle: &'a PendingHandle,
        _timeout: Duration,
    ) -> BoxFuture<'a, LedgerResult<Receipt>> {
        let result = self.state.lock().confirms.pop_front().expect("unscripted confirm");
        Box::pin(async move { result })
    }

    fn get_account<'a>(
        &'a self,
        _address: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<AccountView>>> {
        let result = self
            .state
            .lock()
            .account_lookups
            .pop_front()
            .expect("unscripted get_account");
        Box::pin(async move { result })
    }

    fn get_market_state<'a>(
        &'a self,
        _market: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<MarketState>>> {
        let result = self
            .state
            .lock()
            .market_lookups
            .pop_front()
            .expect("unscripted get_market_state");
        Box::pin(async move { result })
    }

    fn lookup_intent<'a>(
        &'a self,
        _intent: &'a IntentId,
        _window: Duration,
    ) -> BoxFuture<'a, LedgerResult<Option<Receipt>>> {
        Box::pin(async move { Ok(None) })
    }
}

/// Deterministic signing identity for tests.
pub fn test_keypair() -> LedgerKeypair {
    use std::io::Write;

    let signing = ed25519_dalek::SigningKey::from_bytes(&[7u8; 32]);
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let json = serde_json::to_string(&signing.to_keypair_bytes().to_vec()).unwrap();
    file.write_all(json.as_bytes()).unwrap();
    mintseed_ledger::load_keypair(file.path()).unwrap()
}

/// Seed parameters against the given asset symbol.
pub fn sample_seed(amount: u64, slippage_pct: rust_decimal::Decimal) -> mintseed_core::VenueSeed {
    use mintseed_core::{AssetDescriptor, Symbol, VenueSeed};

    VenueSeed::new(
        AssetDescriptor {
            mint: Address::new("Mint1").unwrap(),
            precision: 9,
            authority: Address::new("Auth1").unwrap(),
        },
        Symbol::new("EXT").unwrap(),
        amount,
        slippage_pct,
    )
    .unwrap()
}
