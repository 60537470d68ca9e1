//! Ledger client boundary for the mintseed pipeline.
//!
//! This crate owns everything that touches the ledger directly:
//! - `keypair`: loading the Ed25519 signing identity from a keyfile
//! - `intent`: typed transaction intents the pipeline composes
//! - `client`: the object-safe `LedgerClient` capability trait
//! - `rpc`: the JSON gateway implementation of that trait
//! - `retry`: bounded exponential backoff for retry-safe calls

pub mod client;
pub mod error;
pub mod intent;
pub mod keypair;
pub mod retry;
pub mod rpc;

pub use client::{AccountView, BookLevel, BoxFuture, LedgerClient, MarketState, PendingHandle};
pub use error::{LedgerError, LedgerResult, RejectKind};
pub use intent::{OrderSide, OrderSpec, TxIntent};
pub use keypair::{load_keypair, KeyError, LedgerKeypair};
pub use retry::{retrying, RetryPolicy};
pub use rpc::RpcLedgerClient;
