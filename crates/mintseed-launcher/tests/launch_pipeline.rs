//! End-to-end pipeline scenarios over a scripted ledger.

mod common;

use std::sync::Arc;
use std::time::Duration;

use rust_decimal_macros::dec;

use common::{test_keypair, MockLedger, SubmitScript};
use mintseed_core::{
    Address, FaultKind, LaunchStep, PipelineState, StepStatus, Symbol,
};
use mintseed_launcher::{exit_code, IssuancePipeline, LaunchParams, PipelineSettings};
use mintseed_ledger::{AccountView, LedgerError, RejectKind, RetryPolicy};
use mintseed_venue::PoolVenue;

fn settings(precision: u8) -> PipelineSettings {
    PipelineSettings {
        precision,
        slippage_pct: dec!(5),
        seed_amount: None,
        retry: RetryPolicy {
            max_attempts: 2,
            base_delay_ms: 1,
            max_delay_ms: 2,
        },
        confirm_timeout: Duration::from_secs(5),
        reconcile_window: Duration::from_secs(60),
    }
}

fn params(supply: u64) -> LaunchParams {
    LaunchParams {
        supply,
        name: "Example Token".to_string(),
        symbol: Symbol::new("EXT").unwrap(),
        image_uri: "https://example.com/image.png".to_string(),
        resume_mint: None,
        resume_account: None,
    }
}

fn pool_pipeline(ledger: Arc<MockLedger>, precision: u8) -> IssuancePipeline {
    let settings = settings(precision);
    let venue = Arc::new(PoolVenue::new(
        ledger.clone(),
        Address::new("Pool1").unwrap(),
        settings.retry,
        settings.confirm_timeout,
    ));
    IssuancePipeline::new(ledger, venue, test_keypair(), settings)
}

fn pool_view() -> AccountView {
    AccountView {
        address: Address::new("Pool1").unwrap(),
        owner: None,
    }
}

/// Full success path: supply minted, pool seeded, exit code 0, and every
/// identifier present in the report.
#[tokio::test]
async fn pool_launch_succeeds_end_to_end() {
    let ledger = Arc::new(MockLedger::new());
    {
        let mut state = ledger.state.lock();
        // Create asset.
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigCreate".into(),
            created: Some(Address::new("Mint1").unwrap()),
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigCreate", 1)));
        // Provision account (absent, then created).
        state.account_lookups.push_back(Ok(None));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigAcct".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigAcct", 2)));
        // Allocate supply.
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigMint".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigMint", 3)));
        // Seed pool.
        state.account_lookups.push_back(Ok(Some(pool_view())));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigSeed".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigSeed", 4)));
    }

    let pipeline = pool_pipeline(ledger.clone(), 9);
    let report = pipeline.run(&params(1_000_000)).await;

    assert_eq!(report.state, PipelineState::LiquiditySeeded);
    assert_eq!(exit_code(&report), 0);
    assert_eq!(report.mint_address(), Some("Mint1"));
    assert!(report.account_address().is_some());
    assert_eq!(report.allocation_signature(), Some("sigMint"));
    assert_eq!(report.venue_confirmation(), Some("sigSeed"));
    assert_eq!(
        ledger.submitted_kinds(),
        vec!["createAsset", "createAccount", "mintTo", "addLiquidity"]
    );
}

/// The liquidity submission times out: steps 1-3 keep their identifiers,
/// step 4 reports unreachable, and the exit code says "partial state".
#[tokio::test]
async fn liquidity_timeout_reports_partial_state() {
    let ledger = Arc::new(MockLedger::new());
    {
        let mut state = ledger.state.lock();
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigCreate".into(),
            created: Some(Address::new("Mint1").unwrap()),
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigCreate", 1)));
        state.account_lookups.push_back(Ok(None));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigAcct".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigAcct", 2)));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigMint".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigMint", 3)));
        // Pool exists, but the seed submission never reaches the ledger.
        state.account_lookups.push_back(Ok(Some(pool_view())));
        state
            .submits
            .push_back(SubmitScript::Err(LedgerError::Unreachable("timeout".into())));
    }

    let pipeline = pool_pipeline(ledger, 9);
    let report = pipeline.run(&params(1_000_000)).await;

    assert_eq!(
        report.state,
        PipelineState::Failed {
            at: LaunchStep::SeedVenue
        }
    );
    assert_eq!(exit_code(&report), 2);
    assert_eq!(report.mint_address(), Some("Mint1"));
    assert!(report.account_address().is_some());
    assert_eq!(report.allocation_signature(), Some("sigMint"));

    let (step, cause) = report.failure().unwrap();
    assert_eq!(step, LaunchStep::SeedVenue);
    assert_eq!(cause.kind, FaultKind::LedgerUnreachable);
}

/// Supply allocation rejected: the pipeline halts there, earlier
/// identifiers survive, and the venue step never runs.
#[tokio::test]
async fn rejection_halts_at_the_failing_step() {
    let ledger = Arc::new(MockLedger::new());
    {
        let mut state = ledger.state.lock();
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigCreate".into(),
            created: Some(Address::new("Mint1").unwrap()),
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigCreate", 1)));
        state.account_lookups.push_back(Ok(None));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigAcct".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigAcct", 2)));
        state.submits.push_back(SubmitScript::Err(LedgerError::Rejected {
            kind: RejectKind::Other,
            message: "authority mismatch".into(),
        }));
    }

    let pipeline = pool_pipeline(ledger.clone(), 9);
    let report = pipeline.run(&params(1_000_000)).await;

    assert_eq!(
        report.state,
        PipelineState::Failed {
            at: LaunchStep::AllocateSupply
        }
    );
    assert_eq!(exit_code(&report), 2);
    assert_eq!(report.mint_address(), Some("Mint1"));
    assert!(report.account_address().is_some());
    let (step, cause) = report.failure().unwrap();
    assert_eq!(step, LaunchStep::AllocateSupply);
    assert_eq!(cause.kind, FaultKind::LedgerRejected);
    assert_eq!(report.status(LaunchStep::SeedVenue), &StepStatus::Skipped);
    // No liquidity intent was ever submitted.
    assert_eq!(
        ledger.submitted_kinds(),
        vec!["createAsset", "createAccount", "mintTo"]
    );
}

/// Resuming from a prior partial run re-runs only the remaining steps.
#[tokio::test]
async fn resume_skips_completed_steps() {
    let ledger = Arc::new(MockLedger::new());
    {
        let mut state = ledger.state.lock();
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigMint".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigMint", 3)));
        state.account_lookups.push_back(Ok(Some(pool_view())));
        state.submits.push_back(SubmitScript::Ok {
            signature: "sigSeed".into(),
            created: None,
        });
        state.confirms.push_back(Ok(MockLedger::receipt("sigSeed", 4)));
    }

    let pipeline = pool_pipeline(ledger.clone(), 9);
    let mut launch = params(1_000_000);
    launch.resume_mint = Some(Address::new("Mint1").unwrap());
    launch.resume_account = Some(Address::new("Acct1").unwrap());
    let report = pipeline.run(&launch).await;

    assert_eq!(report.state, PipelineState::LiquiditySeeded);
    assert_eq!(exit_code(&report), 0);
    assert_eq!(report.mint_address(), Some("Mint1"));
    assert_eq!(report.account_address(), Some("Acct1"));
    assert_eq!(ledger.submitted_kinds(), vec!["mintTo", "addLiquidity"]);
}

/// Out-of-range precision fails locally: no ledger call, exit code 1.
#[tokio::test]
async fn invalid_precision_halts_without_ledger_effects() {
    let ledger = Arc::new(MockLedger::new());
    let pipeline = pool_pipeline(ledger.clone(), 10);
    let report = pipeline.run(&params(1_000_000)).await;

    assert_eq!(
        report.state,
        PipelineState::Failed {
            at: LaunchStep::CreateAsset
        }
    );
    assert_eq!(exit_code(&report), 1);
    let (_, cause) = report.failure().unwrap();
    assert_eq!(cause.kind, FaultKind::InvalidParameter);
    assert!(ledger.state.lock().submitted.is_empty());
}

/// Cancellation before the first submission leaves the ledger untouched.
#[tokio::test]
async fn cancellation_before_submission_is_clean() {
    let ledger = Arc::new(MockLedger::new());
    let pipeline = pool_pipeline(ledger.clone(), 9);
    pipeline.cancellation_token().cancel();

    let report = pipeline.run(&params(1_000_000)).await;

    assert_eq!(report.state, PipelineState::Init);
    assert_eq!(exit_code(&report), 1);
    assert!(report.steps().iter().all(|(_, s)| **s == StepStatus::Skipped));
    assert!(ledger.state.lock().submitted.is_empty());
}
