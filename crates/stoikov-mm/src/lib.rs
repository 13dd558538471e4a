//! Avellaneda–Stoikov market making strategy.
//!
//! Provides a single-instrument quoting loop:
//! - Reservation price and spread from the closed-form inventory-risk model
//! - Quote refresh with a minimum interval between refreshes
//! - Hold-time cancellation of resting quotes
//! - Inventory tracking with PnL calculation
//!
//! # Architecture
//!
//! ```text
//! EventSource.next_batch() → StoikovStrategy.run()
//!                             ├─ update_best_positions: best bid/ask
//!                             ├─ InventoryManager: fills → net position
//!                             ├─ QuoteEngine: r ∓ s/2 → place_order() × 2
//!                             └─ RestingOrders: expired → cancel_order()
//! ```

pub mod config;
pub mod error;
pub mod inventory;
pub mod quote_engine;
pub mod resting;
pub mod source;
pub mod strategy;

pub use config::StoikovConfig;
pub use error::{StrategyError, StrategyResult};
pub use inventory::InventoryManager;
pub use quote_engine::{
    compute_quotes, quoted_spread, reservation_price, time_fraction, QuotePair, QuoteSkip,
};
pub use resting::{RestingOrder, RestingOrders};
pub use source::{EventSource, ScriptedEventSource};
pub use strategy::{RunOutput, RunSummary, StoikovStrategy};
