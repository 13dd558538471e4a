//! Core domain types for the Stoikov market maker.
//!
//! This crate provides the types exchanged with the event source:
//! - `Price`, `Size`: Precision-safe numeric types
//! - `OrderSide`, `OrderId`, `Order`, `CancelRecord`: order records
//! - `MdUpdate`, `OwnTrade`, `Event`, `EventBatch`: simulator events
//! - `update_best_positions`: best bid/ask merge rule

pub mod decimal;
pub mod error;
pub mod execution;
pub mod order;
pub mod types;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use execution::{CancelRecord, Order};
pub use order::{OrderId, OrderSide};
pub use types::{
    update_best_positions, AnonTrade, Bbo, BboState, BestPrices, Event, EventBatch, MdUpdate,
    OwnTrade,
};
