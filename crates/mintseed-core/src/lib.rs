//! Core domain types for the mintseed issuance pipeline.
//!
//! This crate provides fundamental types used throughout the system:
//! - `Address`, `Symbol`, `IntentId`: ledger and request identifiers
//! - `AssetDescriptor`, `HoldingAccount`, `SupplyAllocation`: issuance state
//! - `VenueSeed`: liquidity bootstrap parameters
//! - `PipelineReport`: per-step outcome record for resumability

pub mod asset;
pub mod error;
pub mod ident;
pub mod report;
pub mod venue;

pub use asset::{AssetDescriptor, HoldingAccount, SupplyAllocation, MAX_ASSET_PRECISION};
pub use error::{CoreError, Result};
pub use ident::{Address, IntentId, Symbol};
pub use report::{FaultKind, LaunchStep, PipelineReport, PipelineState, StepFailure, StepStatus};
pub use venue::{Receipt, VenueKind, VenueSeed};
