//! JSON gateway implementation of `LedgerClient`.
//!
//! Talks to a ledger gateway that accepts typed intent payloads and owns
//! the wire-level transaction encoding. Transport failures map to
//! `Unreachable`; gateway refusals map to `Rejected` with a parsed
//! classification.

use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, trace};

use mintseed_core::{Address, IntentId, Receipt};

use crate::client::{
    AccountView, BoxFuture, LedgerClient, MarketState, PendingHandle,
};
use crate::error::{LedgerError, LedgerResult, RejectKind};
use crate::intent::TxIntent;
use crate::keypair::LedgerKeypair;

/// Default timeout for gateway requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interval between confirmation polls.
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Serialize)]
struct GatewayRequest<P> {
    method: &'static str,
    params: P,
}

#[derive(Debug, Deserialize)]
struct GatewayResponse<R> {
    result: Option<R>,
    error: Option<GatewayErrorBody>,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    code: String,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubmitParams<'a> {
    intent: &'a TxIntent,
    signer: &'a str,
    signature: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitResult {
    signature: String,
    /// Address assigned by the ledger for creation intents.
    #[serde(default)]
    created: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignatureParams<'a> {
    signature: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmResult {
    confirmed: bool,
    #[serde(default)]
    slot: Option<u64>,
    /// Present when the ledger executed and refused the transaction.
    #[serde(default)]
    rejection: Option<GatewayErrorBody>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddressParams<'a> {
    address: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MarketParams<'a> {
    market: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LookupParams<'a> {
    intent: &'a str,
    window_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReceiptResult {
    signature: String,
    slot: u64,
}

/// `LedgerClient` over an HTTP JSON gateway.
pub struct RpcLedgerClient {
    client: reqwest::Client,
    endpoint: String,
    poll_interval: Duration,
}

impl RpcLedgerClient {
    /// Create a client for the given gateway endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("reqwest client construction");
        Self {
            client,
            endpoint: endpoint.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the confirmation poll interval.
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    async fn call<P, R>(&self, method: &'static str, params: P) -> LedgerResult<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        trace!(method, "Gateway call");
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GatewayRequest { method, params })
            .send()
            .await
            .map_err(|e| LedgerError::Unreachable(format!("{method}: {e}")))?;

        if response.status().is_server_error() {
            return Err(LedgerError::Unreachable(format!(
                "{method}: gateway returned {}",
                response.status()
            )));
        }

        let body: GatewayResponse<R> = response
            .json()
            .await
            .map_err(|e| LedgerError::Unreachable(format!("{method}: invalid body: {e}")))?;

        if let Some(error) = body.error {
            return Err(LedgerError::Rejected {
                kind: RejectKind::from_code(&error.code),
                message: error.message,
            });
        }
        body.result.ok_or_else(|| {
            LedgerError::Unreachable(format!("{method}: gateway returned neither result nor error"))
        })
    }
}

impl LedgerClient for RpcLedgerClient {
    fn holding_address(&self, owner: &Address, asset: &Address) -> Address {
        let mut hasher = Sha256::new();
        hasher.update(owner.as_str().as_bytes());
        hasher.update(b":");
        hasher.update(asset.as_str().as_bytes());
        Address::new(hex::encode(hasher.finalize()))
            .expect("hex digest is a valid address")
    }

    fn submit<'a>(
        &'a self,
        intent: TxIntent,
        signer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, LedgerResult<PendingHandle>> {
        Box::pin(async move {
            let payload = serde_json::to_vec(&intent)?;
            let signature = signer.sign(&payload);
            let intent_id = intent.intent_id().clone();
            debug!(kind = intent.kind_name(), intent = %intent_id, "Submitting intent");

            let result: SubmitResult = self
                .call(
                    "submitIntent",
                    SubmitParams {
                        intent: &intent,
                        signer: signer.address().as_str(),
                        signature,
                    },
                )
                .await?;

            let created = result
                .created
                .map(Address::new)
                .transpose()
                .map_err(|e| LedgerError::Rejected {
                    kind: RejectKind::Other,
                    message: format!("gateway returned invalid created address: {e}"),
                })?;

            Ok(PendingHandle {
                signature: result.signature,
                intent: intent_id,
                created,
                submitted_at: Utc::now(),
            })
        })
    }

    fn confirm<'a>(
        &'a self,
        handle: &'a PendingHandle,
        timeout: Duration,
    ) -> BoxFuture<'a, LedgerResult<Receipt>> {
        Box::pin(async move {
            let deadline = tokio::time::Instant::now() + timeout;
            loop {
                let poll: LedgerResult<ConfirmResult> = self
                    .call(
                        "confirmTransaction",
                        SignatureParams {
                            signature: &handle.signature,
                        },
                    )
                    .await;

                match poll {
                    Ok(result) => {
                        if let Some(rejection) = result.rejection {
                            return Err(LedgerError::Rejected {
                                kind: RejectKind::from_code(&rejection.code),
                                message: rejection.message,
                            });
                        }
                        if result.confirmed {
                            return Ok(Receipt {
                                signature: handle.signature.clone(),
                                slot: result.slot.unwrap_or_default(),
                                confirmed_at: Utc::now(),
                            });
                        }
                    }
                    Err(LedgerError::Unreachable(reason)) => {
                        // Transient poll failures consume the deadline,
                        // not the outcome.
                        debug!(signature = %handle.signature, %reason, "Confirmation poll failed");
                    }
                    Err(other) => return Err(other),
                }

                if tokio::time::Instant::now() + self.poll_interval > deadline {
                    return Err(LedgerError::ConfirmTimeout {
                        signature: handle.signature.clone(),
                    });
                }
                tokio::time::sleep(self.poll_interval).await;
            }
        })
    }

    fn get_account<'a>(
        &'a self,
        address: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<AccountView>>> {
        Box::pin(async move {
            self.call(
                "getAccount",
                AddressParams {
                    address: address.as_str(),
                },
            )
            .await
        })
    }

    fn get_market_state<'a>(
        &'a self,
        market: &'a Address,
    ) -> BoxFuture<'a, LedgerResult<Option<MarketState>>> {
        Box::pin(async move {
            self.call(
                "getMarketState",
                MarketParams {
                    market: market.as_str(),
                },
            )
            .await
        })
    }

    fn lookup_intent<'a>(
        &'a self,
        intent: &'a IntentId,
        window: Duration,
    ) -> BoxFuture<'a, LedgerResult<Option<Receipt>>> {
        Box::pin(async move {
            let found: Option<ReceiptResult> = self
                .call(
                    "lookupIntent",
                    LookupParams {
                        intent: intent.as_str(),
                        window_secs: window.as_secs(),
                    },
                )
                .await?;
            Ok(found.map(|r| Receipt {
                signature: r.signature,
                slot: r.slot,
                confirmed_at: Utc::now(),
            }))
        })
    }
}
