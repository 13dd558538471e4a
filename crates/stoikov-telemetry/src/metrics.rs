//! Prometheus metrics for the Stoikov market maker.
//!
//! Covers the quoting loop:
//! - Batches consumed from the event source
//! - Orders placed / cancelled by the strategy
//! - Own fills and resulting inventory
//! - Last reservation price and quoted spread
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration fails,
//! it indicates a fatal configuration error (e.g., duplicate metric names)
//! that should cause an immediate crash at startup rather than silent failure.
//! These panics only occur during static initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter, register_counter_vec, register_gauge, Counter, CounterVec, Encoder, Gauge,
    TextEncoder,
};

use crate::error::TelemetryResult;

/// Event batches pulled from the source.
pub static BATCHES_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "stoikov_batches_total",
        "Total event batches pulled from the event source"
    )
    .unwrap()
});

/// Orders placed by the strategy.
/// Labels: side (buy/sell)
pub static ORDERS_PLACED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "stoikov_orders_placed_total",
        "Total quote orders placed",
        &["side"]
    )
    .unwrap()
});

/// Orders cancelled after exceeding the hold time.
pub static ORDERS_CANCELED_TOTAL: Lazy<Counter> = Lazy::new(|| {
    register_counter!(
        "stoikov_orders_canceled_total",
        "Total resting orders cancelled on hold-time expiry"
    )
    .unwrap()
});

/// Own fills received.
/// Labels: side (buy/sell)
pub static FILLS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!("stoikov_fills_total", "Total own fills received", &["side"]).unwrap()
});

/// Current inventory in base units.
pub static INVENTORY: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!("stoikov_inventory", "Current net inventory in base units").unwrap()
});

/// Last computed reservation price.
pub static RESERVATION_PRICE: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "stoikov_reservation_price",
        "Last computed inventory-adjusted reservation price"
    )
    .unwrap()
});

/// Last computed quoted spread.
pub static QUOTED_SPREAD: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!("stoikov_quoted_spread", "Last computed quoted spread").unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a batch pulled from the event source.
    pub fn batch_received() {
        BATCHES_TOTAL.inc();
    }

    /// Record an order placement.
    pub fn order_placed(side: &str) {
        ORDERS_PLACED_TOTAL.with_label_values(&[side]).inc();
    }

    /// Record a hold-time cancellation.
    pub fn order_canceled() {
        ORDERS_CANCELED_TOTAL.inc();
    }

    /// Record an own fill.
    pub fn fill(side: &str) {
        FILLS_TOTAL.with_label_values(&[side]).inc();
    }

    /// Set current inventory.
    pub fn inventory(net_size: f64) {
        INVENTORY.set(net_size);
    }

    /// Record the latest quote computation.
    pub fn quote(reservation_price: f64, spread: f64) {
        RESERVATION_PRICE.set(reservation_price);
        QUOTED_SPREAD.set(spread);
    }

    /// Render all registered metrics in the Prometheus text format.
    pub fn render() -> TelemetryResult<String> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&prometheus::gather(), &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}
