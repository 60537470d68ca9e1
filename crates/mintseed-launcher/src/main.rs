//! mintseed - asset issuance and liquidity bootstrap CLI.

use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use mintseed_core::{Address, PipelineReport, StepStatus, Symbol, VenueKind};
use mintseed_launcher::{
    exit_code, logging, IssuancePipeline, LaunchConfig, LaunchParams, PipelineSettings,
};
use mintseed_ledger::{load_keypair, LedgerClient, RpcLedgerClient};
use mintseed_venue::{OrderBookConfig, OrderBookVenue, PoolVenue, VenueAdapter};

/// Issue a fungible asset and bootstrap a trading venue for it.
#[derive(Parser, Debug)]
#[command(name = "mintseed", version, about, long_about = None)]
struct Args {
    /// Initial supply in base units.
    supply: u64,

    /// Display name for the asset.
    #[arg(long)]
    name: String,

    /// Display symbol (10 characters max).
    #[arg(long)]
    symbol: String,

    /// Image URI for the launch metadata.
    #[arg(long)]
    image_uri: String,

    /// Venue kind override; defaults to the configured kind.
    #[arg(long, value_parser = ["pool", "order-book"])]
    venue: Option<String>,

    /// Configuration file path (can also be set via MINTSEED_CONFIG).
    #[arg(short, long)]
    config: Option<String>,

    /// Mint address from a previous partial run; skips asset creation.
    #[arg(long)]
    resume_mint: Option<String>,

    /// Holding account address from a previous partial run; skips
    /// provisioning.
    #[arg(long)]
    resume_account: Option<String>,
}

#[tokio::main]
async fn main() {
    logging::init_logging();
    let args = Args::parse();

    match run(args).await {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("Error: {err:#}");
            std::process::exit(1);
        }
    }
}

async fn run(args: Args) -> Result<i32> {
    if args.supply == 0 {
        bail!("supply must be positive");
    }
    let symbol = Symbol::new(args.symbol.as_str()).context("invalid symbol")?;
    url::Url::parse(&args.image_uri).context("invalid image URI")?;
    let resume_mint = args
        .resume_mint
        .as_deref()
        .map(Address::new)
        .transpose()
        .context("invalid --resume-mint")?;
    let resume_account = args
        .resume_account
        .as_deref()
        .map(Address::new)
        .transpose()
        .context("invalid --resume-account")?;

    let config_path = args
        .config
        .or_else(|| std::env::var("MINTSEED_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());
    info!(config_path = %config_path, "Loading configuration");
    let mut config = LaunchConfig::from_file(Path::new(&config_path))?;

    if let Some(kind) = args.venue.as_deref() {
        config.venue.kind = match kind {
            "pool" => VenueKind::Pool,
            _ => VenueKind::OrderBook,
        };
        config.validate()?;
    }

    let keypair = load_keypair(&config.wallet.keypair_path)
        .with_context(|| format!("loading keypair from {}", config.wallet.keypair_path.display()))?;

    let ledger: Arc<dyn LedgerClient> =
        Arc::new(RpcLedgerClient::new(config.ledger.endpoint_url.clone()));
    let venue = build_venue(&config, ledger.clone())?;
    let settings = PipelineSettings {
        precision: config.asset.precision,
        slippage_pct: config.venue.slippage_pct,
        seed_amount: config.venue.seed_amount,
        retry: config.retry_policy(),
        confirm_timeout: config.confirm_timeout(),
        reconcile_window: config.reconcile_window(),
    };

    let params = LaunchParams {
        supply: args.supply,
        name: args.name,
        symbol,
        image_uri: args.image_uri,
        resume_mint,
        resume_account,
    };

    info!(
        supply = params.supply,
        symbol = %params.symbol,
        venue = %config.venue.kind,
        "Starting launch"
    );
    let pipeline = IssuancePipeline::new(ledger, venue, keypair, settings);
    let report = pipeline.run(&params).await;

    print_report(&report, &params, config.venue.kind);
    Ok(exit_code(&report))
}

fn build_venue(
    config: &LaunchConfig,
    ledger: Arc<dyn LedgerClient>,
) -> Result<Arc<dyn VenueAdapter>> {
    let retry = config.retry_policy();
    let timeout = config.confirm_timeout();
    let venue: Arc<dyn VenueAdapter> = match config.venue.kind {
        VenueKind::Pool => Arc::new(PoolVenue::new(
            ledger,
            config.pool_address()?,
            retry,
            timeout,
        )),
        VenueKind::OrderBook => {
            let settings = &config.venue.order_book;
            Arc::new(OrderBookVenue::new(
                ledger,
                config.market_address()?,
                OrderBookConfig {
                    levels: settings.levels,
                    level_spacing_pct: settings.level_spacing_pct,
                    fallback_price: settings.fallback_price,
                },
                retry,
                timeout,
            ))
        }
    };
    Ok(venue)
}

fn print_report(report: &PipelineReport, params: &LaunchParams, venue: VenueKind) {
    if report.is_success() {
        println!("Token created successfully:");
        println!("  Mint address:    {}", report.mint_address().unwrap_or("-"));
        println!(
            "  Holding account: {}",
            report.account_address().unwrap_or("-")
        );
        println!(
            "  Venue ({venue}) confirmation: {}",
            report.venue_confirmation().unwrap_or("-")
        );
        println!("  Name:      {}", params.name);
        println!("  Symbol:    {}", params.symbol);
        println!("  Image URI: {}", params.image_uri);
        return;
    }

    if let Some((step, cause)) = report.failure() {
        eprintln!("Launch halted at {step}: {cause}");
    } else {
        eprintln!("Launch did not complete");
    }
    eprintln!("Step status:");
    for (step, status) in report.steps() {
        match status {
            StepStatus::Succeeded { identifier } => {
                eprintln!("  {step}: ok ({identifier})");
            }
            StepStatus::Failed(failure) => eprintln!("  {step}: failed ({failure})"),
            StepStatus::Skipped => eprintln!("  {step}: skipped"),
        }
    }
    if report.has_ledger_effects() {
        eprintln!(
            "Ledger state was left behind; resume with --resume-mint / --resume-account \
             instead of re-running from scratch."
        );
    }
}
