//! Venue selection and liquidity seeding parameters.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::asset::AssetDescriptor;
use crate::error::{CoreError, Result};
use crate::ident::Symbol;

/// Trading venue kind for liquidity bootstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VenueKind {
    /// Automated market maker pool.
    Pool,
    /// Central limit order book market.
    OrderBook,
}

impl std::fmt::Display for VenueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pool => write!(f, "pool"),
            Self::OrderBook => write!(f, "order-book"),
        }
    }
}

/// Proof that a submitted transaction reached a final, queryable state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Transaction signature assigned by the ledger.
    pub signature: String,
    /// Slot in which the transaction was finalized.
    pub slot: u64,
    /// Time the confirmation was observed.
    pub confirmed_at: DateTime<Utc>,
}

/// Parameters for one liquidity bootstrap. Consumed once by a venue
/// adapter; the resulting receipt is reported, not retained as state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueSeed {
    /// Asset being seeded.
    pub asset: AssetDescriptor,
    /// Display label for the pair.
    pub symbol: Symbol,
    /// Seed amount in base units.
    pub amount: u64,
    /// Maximum tolerated price deviation, as a percentage in [0, 100].
    pub slippage_pct: Decimal,
}

impl VenueSeed {
    /// Validate and build seed parameters.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidAmount` for a zero amount and
    /// `CoreError::InvalidSlippage` for a bound outside [0, 100].
    pub fn new(
        asset: AssetDescriptor,
        symbol: Symbol,
        amount: u64,
        slippage_pct: Decimal,
    ) -> Result<Self> {
        if amount == 0 {
            return Err(CoreError::InvalidAmount("seed amount must be positive".to_string()));
        }
        if slippage_pct < Decimal::ZERO || slippage_pct > Decimal::ONE_HUNDRED {
            return Err(CoreError::InvalidSlippage(format!(
                "{slippage_pct}% outside [0, 100]"
            )));
        }
        Ok(Self {
            asset,
            symbol,
            amount,
            slippage_pct,
        })
    }
}
