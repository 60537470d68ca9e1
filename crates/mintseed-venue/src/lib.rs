//! Venue adapters for liquidity seeding.
//!
//! Two venue kinds behind one object-safe contract:
//! - `PoolVenue`: one liquidity-provision transaction against an AMM pool
//! - `OrderBookVenue`: a two-sided quote ladder against an order-book
//!   market, batched where the market supports it
//!
//! Neither adapter assumes its market or pool exists; a missing venue is a
//! configuration error, distinct from a ledger rejection and never retried.

pub mod adapter;
pub mod error;
pub mod order_book;
pub mod pool;

pub use adapter::{FailedOrder, PlacedOrder, SeedOutcome, VenueAdapter};
pub use error::{VenueError, VenueResult};
pub use order_book::{OrderBookConfig, OrderBookVenue};
pub use pool::PoolVenue;

#[cfg(test)]
mod test_support;
