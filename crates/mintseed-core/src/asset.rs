//! Issuance state: asset classes, holding accounts, supply allocations.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};
use crate::ident::{Address, IntentId};
use crate::venue::Receipt;

/// Largest decimal precision the ledger supports for an asset class.
pub const MAX_ASSET_PRECISION: u8 = 9;

/// A created asset class. Precision is fixed at creation and immutable for
/// the asset's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDescriptor {
    /// Ledger-assigned mint address.
    pub mint: Address,
    /// Decimal precision.
    pub precision: u8,
    /// Identity allowed to mint further supply.
    pub authority: Address,
}

impl AssetDescriptor {
    /// Validate precision against the ledger's supported range.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidPrecision` above `MAX_ASSET_PRECISION`.
    pub fn check_precision(precision: u8) -> Result<()> {
        if precision > MAX_ASSET_PRECISION {
            return Err(CoreError::InvalidPrecision(precision, MAX_ASSET_PRECISION));
        }
        Ok(())
    }
}

/// Balance location for one (owner, asset) pair.
///
/// At most one canonical holding account exists per pair; provisioning is
/// idempotent and returns the existing account when already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingAccount {
    /// Ledger-assigned account address.
    pub address: Address,
    /// Owning identity.
    pub owner: Address,
    /// Asset (mint address) this account holds.
    pub asset: Address,
}

/// Record of a confirmed mint-to. Each allocation increases circulating
/// supply; the ledger transaction is the only persisted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyAllocation {
    /// Confirmation for the mint transaction.
    pub receipt: Receipt,
    /// Destination holding account.
    pub destination: Address,
    /// Amount in base units.
    pub amount: u64,
    /// Logical request identifier the transaction carried.
    pub intent: IntentId,
}
