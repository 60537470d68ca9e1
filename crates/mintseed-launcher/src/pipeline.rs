//! The issuance pipeline state machine.
//!
//! Steps run strictly sequentially: each submits only after the previous
//! step's result is confirmed, because each consumes identifiers the
//! previous one produced. On failure the pipeline halts immediately and
//! the report keeps every identifier already earned, so an operator can
//! resume from the last successful step instead of restarting (a restart
//! would create a second asset).

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use mintseed_core::{
    Address, AssetDescriptor, HoldingAccount, LaunchStep, PipelineReport, PipelineState,
    StepFailure, StepStatus, Symbol, VenueSeed,
};
use mintseed_issuance::{AccountProvisioner, AssetIssuer, SupplyAllocator};
use mintseed_ledger::{LedgerClient, LedgerKeypair, RetryPolicy};
use mintseed_venue::VenueAdapter;

/// Launch request: what to issue and how to label it.
#[derive(Debug, Clone)]
pub struct LaunchParams {
    /// Initial supply in base units.
    pub supply: u64,
    /// Display name.
    pub name: String,
    /// Display symbol; also labels the venue seed.
    pub symbol: Symbol,
    /// Display image URI.
    pub image_uri: String,
    /// Mint address from a previous partial run; skips asset creation.
    pub resume_mint: Option<Address>,
    /// Holding account from a previous partial run; skips provisioning.
    pub resume_account: Option<Address>,
}

/// Tunables threaded from configuration into the step components.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub precision: u8,
    pub slippage_pct: Decimal,
    /// Base units to seed at the venue; defaults to the full supply.
    pub seed_amount: Option<u64>,
    pub retry: RetryPolicy,
    pub confirm_timeout: Duration,
    pub reconcile_window: Duration,
}

/// Sequences asset creation, account provisioning, supply allocation, and
/// venue seeding over a shared ledger client.
pub struct IssuancePipeline {
    issuer: AssetIssuer,
    provisioner: AccountProvisioner,
    allocator: SupplyAllocator,
    venue: Arc<dyn VenueAdapter>,
    keypair: LedgerKeypair,
    settings: PipelineSettings,
    cancel: CancellationToken,
}

impl IssuancePipeline {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        venue: Arc<dyn VenueAdapter>,
        keypair: LedgerKeypair,
        settings: PipelineSettings,
    ) -> Self {
        let issuer = AssetIssuer::new(ledger.clone(), settings.retry, settings.confirm_timeout);
        let provisioner =
            AccountProvisioner::new(ledger.clone(), settings.retry, settings.confirm_timeout);
        let allocator = SupplyAllocator::new(
            ledger,
            settings.retry,
            settings.confirm_timeout,
            settings.reconcile_window,
        );
        Self {
            issuer,
            provisioner,
            allocator,
            venue,
            keypair,
            settings,
            cancel: CancellationToken::new(),
        }
    }

    /// Token observed before each step's submission. Cancellation between
    /// steps leaves the ledger untouched; a step already submitting runs
    /// to confirmation or timeout so the report never misstates the
    /// outcome.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Run the pipeline to terminal state.
    pub async fn run(&self, params: &LaunchParams) -> PipelineReport {
        let mut report = PipelineReport::empty();

        // Step 1: create the asset class.
        let asset = if let Some(mint) = &params.resume_mint {
            info!(mint = %mint, "Resuming with existing mint");
            report.record(
                LaunchStep::CreateAsset,
                StepStatus::Succeeded {
                    identifier: mint.to_string(),
                },
            );
            AssetDescriptor {
                mint: mint.clone(),
                precision: self.settings.precision,
                authority: self.keypair.address().clone(),
            }
        } else {
            if self.cancelled(&report) {
                return report;
            }
            match self.issuer.issue(self.settings.precision, &self.keypair).await {
                Ok(asset) => {
                    report.record(
                        LaunchStep::CreateAsset,
                        StepStatus::Succeeded {
                            identifier: asset.mint.to_string(),
                        },
                    );
                    asset
                }
                Err(err) => {
                    return self.halt(
                        report,
                        LaunchStep::CreateAsset,
                        StepFailure::new(err.fault_kind(), err.to_string()),
                    );
                }
            }
        };
        report.state = PipelineState::AssetCreated;

        // Step 2: ensure the holding account.
        let account = if let Some(address) = &params.resume_account {
            info!(account = %address, "Resuming with existing holding account");
            report.record(
                LaunchStep::ProvisionAccount,
                StepStatus::Succeeded {
                    identifier: address.to_string(),
                },
            );
            HoldingAccount {
                address: address.clone(),
                owner: self.keypair.address().clone(),
                asset: asset.mint.clone(),
            }
        } else {
            if self.cancelled(&report) {
                return report;
            }
            match self
                .provisioner
                .ensure_account(self.keypair.address(), &asset, &self.keypair)
                .await
            {
                Ok(account) => {
                    report.record(
                        LaunchStep::ProvisionAccount,
                        StepStatus::Succeeded {
                            identifier: account.address.to_string(),
                        },
                    );
                    account
                }
                Err(err) => {
                    return self.halt(
                        report,
                        LaunchStep::ProvisionAccount,
                        StepFailure::new(err.fault_kind(), err.to_string()),
                    );
                }
            }
        };
        report.state = PipelineState::AccountReady;

        // Step 3: allocate the initial supply.
        if self.cancelled(&report) {
            return report;
        }
        match self
            .allocator
            .allocate(&account, params.supply, &self.keypair)
            .await
        {
            Ok(allocation) => {
                report.record(
                    LaunchStep::AllocateSupply,
                    StepStatus::Succeeded {
                        identifier: allocation.receipt.signature.clone(),
                    },
                );
            }
            Err(err) => {
                return self.halt(
                    report,
                    LaunchStep::AllocateSupply,
                    StepFailure::new(err.fault_kind(), err.to_string()),
                );
            }
        }
        report.state = PipelineState::SupplyAllocated;

        // Step 4: seed liquidity at the venue.
        if self.cancelled(&report) {
            return report;
        }
        let seed_amount = self.settings.seed_amount.unwrap_or(params.supply);
        let seed = match self.venue_seed(&asset, params, seed_amount) {
            Ok(seed) => seed,
            Err(failure) => return self.halt(report, LaunchStep::SeedVenue, failure),
        };
        match self.venue.seed(&seed, &self.keypair).await {
            Ok(outcome) => {
                let identifier = outcome.confirmation().unwrap_or("none").to_string();
                if outcome.is_partial() {
                    warn!(kind = %self.venue.kind(), "Liquidity seeded partially; see per-order results");
                }
                report.record(
                    LaunchStep::SeedVenue,
                    StepStatus::Succeeded { identifier },
                );
                report.state = PipelineState::LiquiditySeeded;
                report
            }
            Err(err) => self.halt(
                report,
                LaunchStep::SeedVenue,
                StepFailure::new(err.fault_kind(), err.to_string()),
            ),
        }
    }

    fn venue_seed(
        &self,
        asset: &AssetDescriptor,
        params: &LaunchParams,
        seed_amount: u64,
    ) -> Result<VenueSeed, StepFailure> {
        if seed_amount > params.supply {
            return Err(StepFailure::new(
                mintseed_core::FaultKind::InvalidParameter,
                format!(
                    "seed amount {} exceeds the allocated supply {}",
                    seed_amount, params.supply
                ),
            ));
        }
        VenueSeed::new(
            asset.clone(),
            params.symbol.clone(),
            seed_amount,
            self.settings.slippage_pct,
        )
        .map_err(|e| {
            StepFailure::new(mintseed_core::FaultKind::InvalidParameter, e.to_string())
        })
    }

    fn cancelled(&self, report: &PipelineReport) -> bool {
        if self.cancel.is_cancelled() {
            info!(state = ?report.state, "Launch cancelled before next submission");
            return true;
        }
        false
    }

    fn halt(
        &self,
        mut report: PipelineReport,
        step: LaunchStep,
        failure: StepFailure,
    ) -> PipelineReport {
        warn!(step = %step, cause = %failure, "Pipeline halted");
        report.record(step, StepStatus::Failed(failure));
        report.state = PipelineState::Failed { at: step };
        report
    }
}

/// Process exit code for a finished launch: `0` full success, `1` halted
/// with no ledger side effects, `2` halted after partial ledger side
/// effects (operator must inspect or resume).
#[must_use]
pub fn exit_code(report: &PipelineReport) -> i32 {
    if report.is_success() {
        0
    } else if report.has_ledger_effects() {
        2
    } else {
        1
    }
}
