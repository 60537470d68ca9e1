//! Order-book market liquidity seeding.

use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{info, warn};

use mintseed_core::{Address, IntentId, VenueKind, VenueSeed};
use mintseed_ledger::{
    retrying, BoxFuture, LedgerClient, LedgerKeypair, OrderSide, OrderSpec, RetryPolicy, TxIntent,
};

use crate::adapter::{FailedOrder, PlacedOrder, SeedOutcome, VenueAdapter};
use crate::error::{VenueError, VenueResult};

/// Quote ladder configuration for order-book seeding.
#[derive(Debug, Clone)]
pub struct OrderBookConfig {
    /// Price levels per side.
    pub levels: u32,
    /// Spacing between levels, percent of the reference price.
    pub level_spacing_pct: Decimal,
    /// Reference price to quote around when the book is empty, as it will
    /// be for a freshly listed asset.
    pub fallback_price: Option<Decimal>,
}

impl Default for OrderBookConfig {
    fn default() -> Self {
        Self {
            levels: 2,
            level_spacing_pct: Decimal::ONE,
            fallback_price: None,
        }
    }
}

/// Builds a symmetric two-sided quote ladder around the reference price.
/// The full seed amount is distributed across the orders; zero-size
/// leftovers are dropped.
fn build_ladder(
    reference: Decimal,
    amount: u64,
    levels: u32,
    spacing_pct: Decimal,
) -> Vec<OrderSpec> {
    let levels = u64::from(levels.max(1));
    let ask_total = amount / 2;
    let bid_total = amount - ask_total;

    let mut orders = Vec::new();
    let mut push_side = |side: OrderSide, side_total: u64| {
        let base = side_total / levels;
        let remainder = side_total % levels;
        for i in 0..levels {
            let size = base + u64::from(i < remainder);
            if size == 0 {
                continue;
            }
            let offset = reference * spacing_pct * Decimal::from(i + 1) / Decimal::ONE_HUNDRED;
            let price = match side {
                OrderSide::Bid => reference - offset,
                OrderSide::Ask => reference + offset,
            };
            orders.push(OrderSpec { side, price, size });
        }
    };
    push_side(OrderSide::Bid, bid_total);
    push_side(OrderSide::Ask, ask_total);
    orders
}

/// Seeds liquidity by quoting both sides of an order-book market.
///
/// Loads the current book, derives a reference price from the best
/// bid/ask, and places the ladder as one batched transaction where the
/// market supports it. Without batching, orders are submitted one by one
/// and the outcome reports each order separately: a partial placement is
/// real state on the ledger and is never collapsed into one boolean.
pub struct OrderBookVenue {
    ledger: Arc<dyn LedgerClient>,
    market: Address,
    config: OrderBookConfig,
    retry: RetryPolicy,
    confirm_timeout: Duration,
}

impl OrderBookVenue {
    pub fn new(
        ledger: Arc<dyn LedgerClient>,
        market: Address,
        config: OrderBookConfig,
        retry: RetryPolicy,
        confirm_timeout: Duration,
    ) -> Self {
        Self {
            ledger,
            market,
            config,
            retry,
            confirm_timeout,
        }
    }

    async fn seed_inner(
        &self,
        seed: &VenueSeed,
        payer: &LedgerKeypair,
    ) -> VenueResult<SeedOutcome> {
        let book = retrying(self.retry, "getMarketState", || {
            self.ledger.get_market_state(&self.market)
        })
        .await
        .map_err(VenueError::from_ledger)?
        .ok_or_else(|| {
            VenueError::NotFound(format!("market {} does not exist on the ledger", self.market))
        })?;

        let reference = book
            .mid_price()
            .or(self.config.fallback_price)
            .ok_or_else(|| {
                VenueError::NoReferencePrice(format!(
                    "market {} book is empty and no fallback reference price is configured",
                    self.market
                ))
            })?;

        let orders = build_ladder(
            reference,
            seed.amount,
            self.config.levels,
            self.config.level_spacing_pct,
        );

        let outcome = if book.supports_batching {
            self.seed_batched(seed, orders, payer).await?
        } else {
            self.seed_sequential(seed, orders, payer).await?
        };

        if let SeedOutcome::OrderBook { placed, failed } = &outcome {
            info!(
                market = %self.market,
                symbol = %seed.symbol,
                placed = placed.len(),
                failed = failed.len(),
                "Order-book liquidity seeded"
            );
        }
        Ok(outcome)
    }

    async fn seed_batched(
        &self,
        seed: &VenueSeed,
        orders: Vec<OrderSpec>,
        payer: &LedgerKeypair,
    ) -> VenueResult<SeedOutcome> {
        let intent = TxIntent::PlaceOrders {
            intent: IntentId::new(),
            market: self.market.clone(),
            orders: orders.clone(),
            slippage_pct: seed.slippage_pct,
        };
        let handle = self
            .ledger
            .submit(intent, payer)
            .await
            .map_err(VenueError::from_ledger)?;
        let receipt = self
            .ledger
            .confirm(&handle, self.confirm_timeout)
            .await
            .map_err(VenueError::from_ledger)?;

        let placed = orders
            .into_iter()
            .map(|spec| PlacedOrder {
                spec,
                receipt: receipt.clone(),
            })
            .collect();
        Ok(SeedOutcome::OrderBook {
            placed,
            failed: Vec::new(),
        })
    }

    async fn seed_sequential(
        &self,
        seed: &VenueSeed,
        orders: Vec<OrderSpec>,
        payer: &LedgerKeypair,
    ) -> VenueResult<SeedOutcome> {
        let mut placed = Vec::new();
        let mut failed = Vec::new();
        let mut first_error: Option<VenueError> = None;

        for spec in orders {
            let intent = TxIntent::PlaceOrders {
                intent: IntentId::new(),
                market: self.market.clone(),
                orders: vec![spec.clone()],
                slippage_pct: seed.slippage_pct,
            };
            let result = match self.ledger.submit(intent, payer).await {
                Ok(handle) => self.ledger.confirm(&handle, self.confirm_timeout).await,
                Err(err) => Err(err),
            };
            match result {
                Ok(receipt) => placed.push(PlacedOrder { spec, receipt }),
                Err(err) => {
                    let venue_err = VenueError::from_ledger(err);
                    warn!(
                        market = %self.market,
                        side = ?spec.side,
                        price = %spec.price,
                        error = %venue_err,
                        "Order placement failed"
                    );
                    failed.push(FailedOrder {
                        spec,
                        cause: venue_err.to_string(),
                    });
                    first_error.get_or_insert(venue_err);
                }
            }
        }

        if placed.is_empty() {
            if let Some(err) = first_error {
                return Err(err);
            }
        }
        Ok(SeedOutcome::OrderBook { placed, failed })
    }
}

impl VenueAdapter for OrderBookVenue {
    fn kind(&self) -> VenueKind {
        VenueKind::OrderBook
    }

    fn seed<'a>(
        &'a self,
        seed: &'a VenueSeed,
        payer: &'a LedgerKeypair,
    ) -> BoxFuture<'a, VenueResult<SeedOutcome>> {
        Box::pin(self.seed_inner(seed, payer))
    }
}
