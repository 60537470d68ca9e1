//! Issuance step components for the mintseed pipeline.
//!
//! Three ledger-mutating steps, each owning its retry and reconciliation
//! discipline:
//! - `AssetIssuer`: creates the asset class (not idempotent; never blindly
//!   retried after rejection)
//! - `AccountProvisioner`: idempotent get-or-create of the canonical
//!   holding account
//! - `SupplyAllocator`: mints initial supply, reconciling against the
//!   ledger before any retry of the non-idempotent mint

pub mod allocator;
pub mod error;
pub mod issuer;
pub mod provisioner;

pub use allocator::SupplyAllocator;
pub use error::{IssuanceError, IssuanceResult};
pub use issuer::AssetIssuer;
pub use provisioner::AccountProvisioner;

#[cfg(test)]
mod test_support;
