//! Launch configuration.
//!
//! Everything the original tooling hardcoded (cluster URL, wallet path,
//! market and pool addresses) is explicit configuration, validated at
//! startup before any ledger call.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use mintseed_core::{Address, AssetDescriptor, VenueKind};
use mintseed_ledger::RetryPolicy;

use crate::error::{AppError, AppResult};

/// Top-level configuration, loaded from a TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchConfig {
    pub ledger: LedgerConfig,
    pub wallet: WalletConfig,
    #[serde(default)]
    pub asset: AssetConfig,
    pub venue: VenueConfig,
}

/// Ledger gateway configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Gateway endpoint URL.
    pub endpoint_url: String,
    /// Per-transaction confirmation deadline (ms). Default: 30,000.
    #[serde(default = "default_confirm_timeout_ms")]
    pub confirm_timeout_ms: u64,
    /// Window searched when reconciling an unconfirmed mint (seconds).
    /// Default: 120.
    #[serde(default = "default_reconcile_window_secs")]
    pub reconcile_window_secs: u64,
    #[serde(default)]
    pub retry: RetryConfig,
}

/// Backoff settings for retry-safe ledger calls.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts, including the first. Default: 4.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Base delay before the first retry (ms). Default: 500.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    /// Delay ceiling (ms). Default: 8,000.
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
}

fn default_confirm_timeout_ms() -> u64 {
    30_000
}

fn default_reconcile_window_secs() -> u64 {
    120
}

fn default_max_attempts() -> u32 {
    4
}

fn default_base_delay_ms() -> u64 {
    500
}

fn default_max_delay_ms() -> u64 {
    8_000
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
        }
    }
}

/// Wallet configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletConfig {
    /// Path to the JSON keyfile holding the signing identity.
    pub keypair_path: PathBuf,
}

/// Asset creation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Decimal precision of the new asset. Default: 9.
    #[serde(default = "default_precision")]
    pub precision: u8,
}

fn default_precision() -> u8 {
    9
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

/// Venue selection and seeding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueConfig {
    /// Which venue kind to seed.
    pub kind: VenueKind,
    /// AMM pool address; required when kind = "pool".
    #[serde(default)]
    pub pool_address: Option<String>,
    /// Order-book market address; required when kind = "order-book".
    #[serde(default)]
    pub market_address: Option<String>,
    /// Maximum tolerated price deviation, percent. Default: 5.
    #[serde(default = "default_slippage_pct")]
    pub slippage_pct: Decimal,
    /// Base units to seed. Defaults to the full minted supply.
    #[serde(default)]
    pub seed_amount: Option<u64>,
    #[serde(default)]
    pub order_book: OrderBookSettings,
}

fn default_slippage_pct() -> Decimal {
    Decimal::from(5)
}

/// Quote ladder settings for order-book seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookSettings {
    /// Price levels per side. Default: 2.
    #[serde(default = "default_levels")]
    pub levels: u32,
    /// Spacing between levels, percent of the reference price. Default: 1.
    #[serde(default = "default_level_spacing_pct")]
    pub level_spacing_pct: Decimal,
    /// Reference price when the book is empty, as it will be for a fresh
    /// listing.
    #[serde(default)]
    pub fallback_price: Option<Decimal>,
}

fn default_levels() -> u32 {
    2
}

fn default_level_spacing_pct() -> Decimal {
    Decimal::ONE
}

impl Default for OrderBookSettings {
    fn default() -> Self {
        Self {
            levels: default_levels(),
            level_spacing_pct: default_level_spacing_pct(),
            fallback_price: None,
        }
    }
}

impl LaunchConfig {
    /// Load and validate configuration from a TOML file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate cross-field requirements before any ledger call.
    pub fn validate(&self) -> AppResult<()> {
        url::Url::parse(&self.ledger.endpoint_url)
            .map_err(|e| AppError::Config(format!("invalid ledger.endpoint_url: {e}")))?;

        AssetDescriptor::check_precision(self.asset.precision)
            .map_err(|e| AppError::Config(e.to_string()))?;

        if self.venue.slippage_pct < Decimal::ZERO || self.venue.slippage_pct > Decimal::ONE_HUNDRED
        {
            return Err(AppError::Config(format!(
                "venue.slippage_pct {} outside [0, 100]",
                self.venue.slippage_pct
            )));
        }

        match self.venue.kind {
            VenueKind::Pool => {
                self.pool_address()?;
            }
            VenueKind::OrderBook => {
                self.market_address()?;
            }
        }
        Ok(())
    }

    /// Validated pool address; required for pool venues.
    pub fn pool_address(&self) -> AppResult<Address> {
        let raw = self
            .venue
            .pool_address
            .as_deref()
            .ok_or_else(|| AppError::Config("venue.pool_address is required for kind = \"pool\"".into()))?;
        Address::new(raw).map_err(|e| AppError::Config(format!("venue.pool_address: {e}")))
    }

    /// Validated market address; required for order-book venues.
    pub fn market_address(&self) -> AppResult<Address> {
        let raw = self.venue.market_address.as_deref().ok_or_else(|| {
            AppError::Config("venue.market_address is required for kind = \"order-book\"".into())
        })?;
        Address::new(raw).map_err(|e| AppError::Config(format!("venue.market_address: {e}")))
    }

    pub fn confirm_timeout(&self) -> Duration {
        Duration::from_millis(self.ledger.confirm_timeout_ms)
    }

    pub fn reconcile_window(&self) -> Duration {
        Duration::from_secs(self.ledger.reconcile_window_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.ledger.retry.max_attempts,
            base_delay_ms: self.ledger.retry.base_delay_ms,
            max_delay_ms: self.ledger.retry.max_delay_ms,
        }
    }
}
