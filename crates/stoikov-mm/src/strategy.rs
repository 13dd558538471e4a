//! Stoikov quoting loop.
//!
//! Pulls batches from an [`EventSource`] until it is exhausted. For each
//! batch:
//! 1. Apply events in arrival order (best prices, fills, inventory)
//! 2. Requote both sides if at least `delay_ns` passed since the last quote
//! 3. Cancel every resting order older than the hold time
//!
//! The loop is single-threaded and synchronous: it blocks on the source,
//! processes the whole batch, then hands control back.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, trace, warn};

use stoikov_core::{update_best_positions, BestPrices, Event, MdUpdate, Order, OrderSide, OwnTrade};
use stoikov_telemetry::Metrics;

use crate::config::StoikovConfig;
use crate::inventory::InventoryManager;
use crate::quote_engine::{compute_quotes, QuoteSkip};
use crate::resting::RestingOrders;
use crate::source::EventSource;

/// Everything the strategy saw and did during a run.
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    /// Own fills, in arrival order.
    pub trades: Vec<OwnTrade>,
    /// Market-data updates, in arrival order.
    pub md_updates: Vec<MdUpdate>,
    /// All events of both kinds, in arrival order.
    pub updates: Vec<Event>,
    /// Every order placed, including ones later cancelled.
    pub orders: Vec<Order>,
}

impl RunOutput {
    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
            && self.md_updates.is_empty()
            && self.updates.is_empty()
            && self.orders.is_empty()
    }
}

/// End-of-run figures logged when the source is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub md_updates: usize,
    pub fills: usize,
    pub orders_placed: usize,
    pub timeout_cancels: u64,
    pub resting_at_end: usize,
    pub final_inventory: Decimal,
    pub realized_pnl: Decimal,
}

/// Single-instrument Avellaneda–Stoikov market maker.
#[derive(Debug)]
pub struct StoikovStrategy {
    config: StoikovConfig,
    /// Effective hold time (config value or its default).
    hold_time_ns: i64,
    inventory: InventoryManager,
    best: BestPrices,
    /// Receive timestamp of the last quote refresh. `None` = never quoted.
    last_quote_ts: Option<i64>,
    resting: RestingOrders,
    /// Receive timestamp of the last batch, for the ordering check.
    last_batch_ts: Option<i64>,
    timeout_cancels: u64,
}

impl StoikovStrategy {
    /// Create a strategy. Parameters are not validated here; see
    /// [`StoikovConfig::validate`].
    pub fn new(config: StoikovConfig) -> Self {
        let hold_time_ns = config.hold_time();
        Self {
            config,
            hold_time_ns,
            inventory: InventoryManager::new(),
            best: BestPrices::default(),
            last_quote_ts: None,
            resting: RestingOrders::new(),
            last_batch_ts: None,
            timeout_cancels: 0,
        }
    }

    /// Run until the source signals end of stream.
    ///
    /// A batch with a receive timestamp earlier than the previous one is
    /// logged and processed normally; the delay check decides whether it
    /// requotes.
    pub fn run<S>(&mut self, source: &mut S) -> RunOutput
    where
        S: EventSource + ?Sized,
    {
        info!(
            gamma = self.config.gamma,
            sigma = self.config.sigma,
            intensity = self.config.intensity,
            horizon_start_ns = self.config.horizon_start_ns,
            horizon_end_ns = self.config.horizon_end_ns,
            delay_ns = self.config.delay_ns,
            hold_time_ns = self.hold_time_ns,
            "Starting Stoikov strategy run"
        );

        let mut output = RunOutput::default();

        while let Some(batch) = source.next_batch() {
            let receive_ts = batch.receive_ts;
            self.check_batch_order(receive_ts);
            Metrics::batch_received();

            for event in batch.events {
                self.on_event(&event, &mut output);
                output.updates.push(event);
            }

            if self.requote_due(receive_ts) {
                self.requote(source, receive_ts, &mut output.orders);
            }

            self.cancel_expired(source, receive_ts);
        }

        let summary = self.summary(&output);
        info!(
            md_updates = summary.md_updates,
            fills = summary.fills,
            orders_placed = summary.orders_placed,
            timeout_cancels = summary.timeout_cancels,
            resting_at_end = summary.resting_at_end,
            inventory = %summary.final_inventory,
            realized_pnl = %summary.realized_pnl,
            "Event source exhausted, run complete"
        );

        output
    }

    /// Summarize a finished run.
    pub fn summary(&self, output: &RunOutput) -> RunSummary {
        RunSummary {
            md_updates: output.md_updates.len(),
            fills: output.trades.len(),
            orders_placed: output.orders.len(),
            timeout_cancels: self.timeout_cancels,
            resting_at_end: self.resting.len(),
            final_inventory: self.inventory.net_size(),
            realized_pnl: self.inventory.realized_pnl(),
        }
    }

    pub fn config(&self) -> &StoikovConfig {
        &self.config
    }

    pub fn hold_time_ns(&self) -> i64 {
        self.hold_time_ns
    }

    /// Net position.
    pub fn inventory(&self) -> Decimal {
        self.inventory.net_size()
    }

    pub fn inventory_manager(&self) -> &InventoryManager {
        &self.inventory
    }

    pub fn best_prices(&self) -> BestPrices {
        self.best
    }

    pub fn last_quote_ts(&self) -> Option<i64> {
        self.last_quote_ts
    }

    pub fn resting_orders(&self) -> &RestingOrders {
        &self.resting
    }

    fn check_batch_order(&mut self, receive_ts: i64) {
        match self.last_batch_ts {
            Some(prev) if receive_ts < prev => {
                warn!(receive_ts, prev, "Batch receive_ts went backwards");
            }
            _ => self.last_batch_ts = Some(receive_ts),
        }
    }

    fn on_event(&mut self, event: &Event, output: &mut RunOutput) {
        match event {
            Event::MarketData(md) => {
                self.best = update_best_positions(self.best, md);
                output.md_updates.push(md.clone());
            }
            Event::OwnTrade(trade) => {
                self.inventory.record_fill(trade.side, trade.price, trade.size);
                Metrics::fill(trade.side.as_str());
                Metrics::inventory(self.inventory.net_size().to_f64().unwrap_or(0.0));

                // A fill consumes the whole resting order.
                if self.resting.remove(trade.order_id).is_some() {
                    debug!(
                        order_id = %trade.order_id,
                        side = %trade.side,
                        price = %trade.price,
                        size = %trade.size,
                        inventory = %self.inventory.net_size(),
                        "Resting quote filled"
                    );
                }
                output.trades.push(trade.clone());
            }
        }
    }

    fn requote_due(&self, receive_ts: i64) -> bool {
        match self.last_quote_ts {
            None => true,
            Some(prev) => receive_ts - prev >= self.config.delay_ns,
        }
    }

    fn requote<S>(&mut self, source: &mut S, receive_ts: i64, orders: &mut Vec<Order>)
    where
        S: EventSource + ?Sized,
    {
        let quotes = match compute_quotes(
            &self.best,
            self.inventory.net_size(),
            &self.config,
            receive_ts,
        ) {
            Ok(quotes) => quotes,
            Err(QuoteSkip::BookIncomplete) => {
                trace!(receive_ts, best = ?self.best, "Book incomplete, not quoting yet");
                return;
            }
            Err(QuoteSkip::NonFinite {
                reservation_price,
                spread,
            }) => {
                self.last_quote_ts = Some(receive_ts);
                warn!(
                    receive_ts,
                    reservation_price,
                    spread,
                    "Non-finite quote, skipping refresh"
                );
                return;
            }
        };

        self.last_quote_ts = Some(receive_ts);
        Metrics::quote(quotes.reservation_price, quotes.spread);

        debug!(
            receive_ts,
            inventory = %self.inventory.net_size(),
            reservation_price = quotes.reservation_price,
            spread = quotes.spread,
            bid = %quotes.bid_price,
            ask = %quotes.ask_price,
            "Requoting"
        );

        for (side, price) in [
            (OrderSide::Buy, quotes.bid_price),
            (OrderSide::Sell, quotes.ask_price),
        ] {
            let order = source.place_order(receive_ts, quotes.size, side, price);
            Metrics::order_placed(side.as_str());
            self.resting.insert(&order);
            orders.push(order);
        }
    }

    fn cancel_expired<S>(&mut self, source: &mut S, receive_ts: i64)
    where
        S: EventSource + ?Sized,
    {
        let expired = self.resting.expired(receive_ts, self.hold_time_ns);
        for order_id in expired {
            source.cancel_order(receive_ts, order_id);
            if let Some(order) = self.resting.remove(order_id) {
                debug!(
                    order_id = %order_id,
                    side = %order.side,
                    age_ns = receive_ts - order.place_ts,
                    "Cancelling expired quote"
                );
            }
            self.timeout_cancels += 1;
            Metrics::order_canceled();
        }
    }
}
