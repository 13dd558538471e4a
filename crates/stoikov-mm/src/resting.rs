//! Resting order bookkeeping.
//!
//! Tracks quotes that were placed but neither filled nor cancelled, keyed by
//! order id. Expiry is two-phase: `expired` only collects ids, the caller
//! cancels and removes them afterwards.

use std::collections::BTreeMap;

use stoikov_core::{Order, OrderId, OrderSide, Price, Size};

/// A quote currently resting at the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestingOrder {
    /// Side (buy for bid, sell for ask).
    pub side: OrderSide,
    /// Quoted price.
    pub price: Price,
    /// Quoted size.
    pub size: Size,
    /// Placement timestamp.
    pub place_ts: i64,
}

impl From<&Order> for RestingOrder {
    fn from(order: &Order) -> Self {
        Self {
            side: order.side,
            price: order.price,
            size: order.size,
            place_ts: order.place_ts,
        }
    }
}

/// Resting orders ordered by id (= placement order).
#[derive(Debug, Default)]
pub struct RestingOrders {
    orders: BTreeMap<OrderId, RestingOrder>,
}

impl RestingOrders {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a newly placed order.
    pub fn insert(&mut self, order: &Order) {
        self.orders.insert(order.order_id, RestingOrder::from(order));
    }

    /// Stop tracking an order. Unknown ids are a no-op.
    pub fn remove(&mut self, order_id: OrderId) -> Option<RestingOrder> {
        self.orders.remove(&order_id)
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.orders.contains_key(&order_id)
    }

    pub fn get(&self, order_id: OrderId) -> Option<&RestingOrder> {
        self.orders.get(&order_id)
    }

    /// Ids of orders placed strictly before `now - hold_time_ns`, ascending.
    pub fn expired(&self, now: i64, hold_time_ns: i64) -> Vec<OrderId> {
        let cutoff = now.saturating_sub(hold_time_ns);
        self.orders
            .iter()
            .filter(|(_, order)| order.place_ts < cutoff)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&OrderId, &RestingOrder)> {
        self.orders.iter()
    }
}
