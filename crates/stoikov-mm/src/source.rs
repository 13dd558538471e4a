//! Event source abstraction.
//!
//! The strategy pulls event batches from a source and drives it with two
//! actions, place and cancel. The source owns matching, latency and order id
//! assignment; the strategy treats its answers as authoritative.

use std::collections::VecDeque;

use stoikov_core::{CancelRecord, EventBatch, Order, OrderId, OrderSide, Price, Size};

/// Trait for the simulator (or any other event source) driving the strategy.
///
/// This trait abstracts the event stream, allowing for:
/// - Unit testing with scripted streams
/// - Different backends (backtest simulator, recorded replay)
pub trait EventSource {
    /// Advance the source and return the next batch, or `None` once the
    /// stream is exhausted.
    fn next_batch(&mut self) -> Option<EventBatch>;

    /// Submit a resting limit order. Returns immediately with the assigned id.
    fn place_order(&mut self, ts: i64, size: Size, side: OrderSide, price: Price) -> Order;

    /// Request cancellation of a resting order. No-op for orders that
    /// already filled.
    fn cancel_order(&mut self, ts: i64, order_id: OrderId);
}

/// Deterministic in-memory source replaying a fixed list of batches.
///
/// Order ids are assigned 1, 2, 3… in placement order so that scripts can
/// contain fills for orders the strategy is expected to place. No matching
/// is performed.
#[derive(Debug)]
pub struct ScriptedEventSource {
    batches: VecDeque<EventBatch>,
    next_order_id: u64,
    placed: Vec<Order>,
    cancels: Vec<CancelRecord>,
}

impl Default for ScriptedEventSource {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl ScriptedEventSource {
    /// Create a source from batches in delivery order.
    pub fn new(batches: Vec<EventBatch>) -> Self {
        Self {
            batches: batches.into(),
            next_order_id: 1,
            placed: Vec::new(),
            cancels: Vec::new(),
        }
    }

    /// Decode a JSON array of batches.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let batches: Vec<EventBatch> = serde_json::from_str(raw)?;
        Ok(Self::new(batches))
    }

    /// Orders placed so far.
    pub fn placed(&self) -> &[Order] {
        &self.placed
    }

    /// Cancels issued so far.
    pub fn cancels(&self) -> &[CancelRecord] {
        &self.cancels
    }

    /// Batches not yet delivered.
    pub fn remaining(&self) -> usize {
        self.batches.len()
    }
}

impl EventSource for ScriptedEventSource {
    fn next_batch(&mut self) -> Option<EventBatch> {
        self.batches.pop_front()
    }

    fn place_order(&mut self, ts: i64, size: Size, side: OrderSide, price: Price) -> Order {
        let order = Order::new(OrderId::new(self.next_order_id), side, size, price, ts);
        self.next_order_id += 1;
        self.placed.push(order.clone());
        order
    }

    fn cancel_order(&mut self, ts: i64, order_id: OrderId) {
        self.cancels.push(CancelRecord::new(order_id, ts));
    }
}
