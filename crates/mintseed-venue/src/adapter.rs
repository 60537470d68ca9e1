//! The venue adapter contract.

use mintseed_core::{Receipt, VenueKind, VenueSeed};
use mintseed_ledger::{BoxFuture, LedgerKeypair, OrderSpec};

use crate::error::VenueResult;

/// One order successfully placed during order-book seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub spec: OrderSpec,
    pub receipt: Receipt,
}

/// One order that failed during sequential order-book seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedOrder {
    pub spec: OrderSpec,
    pub cause: String,
}

/// Result of a liquidity seed.
///
/// Order-book outcomes keep per-order detail; partial placement is never
/// collapsed into one boolean.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Single pool liquidity-provision confirmation.
    Pool { receipt: Receipt },
    /// Per-order outcomes of an order-book seed.
    OrderBook {
        placed: Vec<PlacedOrder>,
        failed: Vec<FailedOrder>,
    },
}

impl SeedOutcome {
    /// Primary confirmation identifier for reporting.
    #[must_use]
    pub fn confirmation(&self) -> Option<&str> {
        match self {
            Self::Pool { receipt } => Some(&receipt.signature),
            Self::OrderBook { placed, .. } => {
                placed.first().map(|order| order.receipt.signature.as_str())
            }
        }
    }

    /// Whether some, but not all, of the intended orders were placed.
    #[must_use]
    pub fn is_partial(&self) -> bool {
        match self {
            Self::Pool { .. } => false,
            Self::OrderBook { placed, failed } => !placed.is_empty() && !failed.is_empty(),
        }
    }
}

/// Capability to seed liquidity for an asset at a trading venue.
pub trait VenueAdapter: Send + Sync {
    /// Which venue kind this adapter drives.
    fn kind(&self) -> VenueKind;

    /// Seed liquidity per the given parameters, paying and signing with
    /// `payer`.
    fn seed<'a>(
        &'a self,
        seed: &'a VenueSeed,
        payer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, VenueResult<SeedOutcome>>;
}
