//! Pipeline outcome reporting.
//!
//! The report records every step's status with its ledger identifier so an
//! operator can decide whether to resume, reverse, or discard after a halt.
//! A restart from scratch after a partial run would create a duplicate
//! asset, so the report is the resume surface.

use serde::{Deserialize, Serialize};

/// Pipeline steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchStep {
    /// Create the asset class (mint).
    CreateAsset,
    /// Ensure the holding account for (owner, asset).
    ProvisionAccount,
    /// Mint the initial supply.
    AllocateSupply,
    /// Seed liquidity at the configured venue.
    SeedVenue,
}

impl std::fmt::Display for LaunchStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateAsset => write!(f, "create-asset"),
            Self::ProvisionAccount => write!(f, "provision-account"),
            Self::AllocateSupply => write!(f, "allocate-supply"),
            Self::SeedVenue => write!(f, "seed-venue"),
        }
    }
}

/// Failure classification shared across the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FaultKind {
    /// Caller input failed local validation; no ledger call was made.
    InvalidParameter,
    /// Signing identity unavailable.
    KeyLoad,
    /// Transient transport failure; eligible for bounded backoff retry.
    LedgerUnreachable,
    /// Ledger-side refusal; never retried.
    LedgerRejected,
    /// Confirmation could not be established for a non-idempotent call;
    /// requires manual reconciliation.
    AmbiguousOutcome,
    /// Venue reported price movement beyond the configured bound.
    SlippageExceeded,
    /// Configured market or pool does not exist; configuration error.
    VenueNotFound,
}

impl FaultKind {
    /// Whether a call failing with this kind may be retried safely.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::LedgerUnreachable)
    }

    /// Whether this kind may have left state on the ledger.
    #[must_use]
    pub fn may_have_ledger_effects(&self) -> bool {
        matches!(self, Self::AmbiguousOutcome)
    }
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidParameter => write!(f, "invalid-parameter"),
            Self::KeyLoad => write!(f, "key-load"),
            Self::LedgerUnreachable => write!(f, "ledger-unreachable"),
            Self::LedgerRejected => write!(f, "ledger-rejected"),
            Self::AmbiguousOutcome => write!(f, "ambiguous-outcome"),
            Self::SlippageExceeded => write!(f, "slippage-exceeded"),
            Self::VenueNotFound => write!(f, "venue-not-found"),
        }
    }
}

/// A step failure: classification plus human-readable detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepFailure {
    pub kind: FaultKind,
    pub message: String,
}

impl StepFailure {
    pub fn new(kind: FaultKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for StepFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Per-step status in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepStatus {
    /// Step confirmed on the ledger; carries the resulting identifier
    /// (mint address, account address, or transaction signature).
    Succeeded { identifier: String },
    /// Step failed; the pipeline halted here.
    Failed(StepFailure),
    /// Step never ran (pipeline halted earlier).
    Skipped,
}

impl StepStatus {
    #[must_use]
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Self::Succeeded { identifier } => Some(identifier),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_succeeded(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

/// Pipeline state machine position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineState {
    Init,
    AssetCreated,
    AccountReady,
    SupplyAllocated,
    /// Terminal success.
    LiquiditySeeded,
    /// Terminal failure at the named step.
    Failed { at: LaunchStep },
}

/// Aggregate pipeline outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub state: PipelineState,
    pub asset: StepStatus,
    pub account: StepStatus,
    pub supply: StepStatus,
    pub venue: StepStatus,
}

impl PipelineReport {
    /// Report with every step pending (skipped until recorded otherwise).
    #[must_use]
    pub fn empty() -> Self {
        Self {
            state: PipelineState::Init,
            asset: StepStatus::Skipped,
            account: StepStatus::Skipped,
            supply: StepStatus::Skipped,
            venue: StepStatus::Skipped,
        }
    }

    /// Steps in execution order, paired with their status.
    #[must_use]
    pub fn steps(&self) -> [(LaunchStep, &StepStatus); 4] {
        [
            (LaunchStep::CreateAsset, &self.asset),
            (LaunchStep::ProvisionAccount, &self.account),
            (LaunchStep::AllocateSupply, &self.supply),
            (LaunchStep::SeedVenue, &self.venue),
        ]
    }

    #[must_use]
    pub fn status(&self, step: LaunchStep) -> &StepStatus {
        match step {
            LaunchStep::CreateAsset => &self.asset,
            LaunchStep::ProvisionAccount => &self.account,
            LaunchStep::AllocateSupply => &self.supply,
            LaunchStep::SeedVenue => &self.venue,
        }
    }

    pub fn record(&mut self, step: LaunchStep, status: StepStatus) {
        let slot = match step {
            LaunchStep::CreateAsset => &mut self.asset,
            LaunchStep::ProvisionAccount => &mut self.account,
            LaunchStep::AllocateSupply => &mut self.supply,
            LaunchStep::SeedVenue => &mut self.venue,
        };
        *slot = status;
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.state == PipelineState::LiquiditySeeded
    }

    /// The failing step and its cause, if the pipeline halted.
    #[must_use]
    pub fn failure(&self) -> Option<(LaunchStep, &StepFailure)> {
        self.steps().into_iter().find_map(|(step, status)| match status {
            StepStatus::Failed(cause) => Some((step, cause)),
            _ => None,
        })
    }

    /// Whether this run (or the run it resumed) left observable state on
    /// the ledger. Drives the 1-vs-2 exit code split.
    #[must_use]
    pub fn has_ledger_effects(&self) -> bool {
        let any_succeeded = self.steps().iter().any(|(_, s)| s.is_succeeded());
        let ambiguous = self
            .failure()
            .is_some_and(|(_, cause)| cause.kind.may_have_ledger_effects());
        any_succeeded || ambiguous
    }

    #[must_use]
    pub fn mint_address(&self) -> Option<&str> {
        self.asset.identifier()
    }

    #[must_use]
    pub fn account_address(&self) -> Option<&str> {
        self.account.identifier()
    }

    #[must_use]
    pub fn allocation_signature(&self) -> Option<&str> {
        self.supply.identifier()
    }

    #[must_use]
    pub fn venue_confirmation(&self) -> Option<&str> {
        self.venue.identifier()
    }
}
