//! Transaction intents.
//!
//! The pipeline composes intents as typed values; the gateway client owns
//! encoding and signing. Every mutating intent carries an `IntentId` so the
//! ledger's record of the submission can be found again after a timeout.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mintseed_core::{Address, IntentId};

/// Side of an order-book quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Bid,
    Ask,
}

/// One order within a `PlaceOrders` intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSpec {
    pub side: OrderSide,
    /// Limit price in quote units.
    pub price: Decimal,
    /// Size in base units.
    pub size: u64,
}

/// A ledger-mutating transaction intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TxIntent {
    /// Create a new asset class with fixed decimal precision.
    #[serde(rename_all = "camelCase")]
    CreateAsset {
        intent: IntentId,
        precision: u8,
        authority: Address,
    },
    /// Create the canonical holding account for (owner, asset).
    #[serde(rename_all = "camelCase")]
    CreateAccount {
        intent: IntentId,
        owner: Address,
        asset: Address,
    },
    /// Mint supply into a holding account.
    #[serde(rename_all = "camelCase")]
    MintTo {
        intent: IntentId,
        destination: Address,
        amount: u64,
        authority: Address,
    },
    /// Provide liquidity to an AMM pool.
    #[serde(rename_all = "camelCase")]
    AddLiquidity {
        intent: IntentId,
        pool: Address,
        asset: Address,
        amount: u64,
        slippage_pct: Decimal,
    },
    /// Place one or more orders on an order-book market, as a single
    /// batched transaction. The slippage bound caps price movement
    /// between book snapshot and execution, enforced venue-side.
    #[serde(rename_all = "camelCase")]
    PlaceOrders {
        intent: IntentId,
        market: Address,
        orders: Vec<OrderSpec>,
        slippage_pct: Decimal,
    },
}

impl TxIntent {
    /// Logical request identifier this intent carries.
    #[must_use]
    pub fn intent_id(&self) -> &IntentId {
        match self {
            Self::CreateAsset { intent, .. }
            | Self::CreateAccount { intent, .. }
            | Self::MintTo { intent, .. }
            | Self::AddLiquidity { intent, .. }
            | Self::PlaceOrders { intent, .. } => intent,
        }
    }

    /// Short name for logging.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::CreateAsset { .. } => "createAsset",
            Self::CreateAccount { .. } => "createAccount",
            Self::MintTo { .. } => "mintTo",
            Self::AddLiquidity { .. } => "addLiquidity",
            Self::PlaceOrders { .. } => "placeOrders",
        }
    }
}
