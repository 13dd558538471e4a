//! Order records returned by the event source.

use serde::{Deserialize, Serialize};

use crate::order::{OrderId, OrderSide};
use crate::{Price, Size};

/// A limit order accepted by the event source.
///
/// The strategy only relies on the identifier, side, price, size and
/// placement timestamp; everything else about execution belongs to the source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier assigned by the source.
    pub order_id: OrderId,
    /// Order side (buy/sell).
    pub side: OrderSide,
    /// Order size.
    pub size: Size,
    /// Limit price.
    pub price: Price,
    /// Placement timestamp (nanoseconds).
    pub place_ts: i64,
}

impl Order {
    #[must_use]
    pub fn new(order_id: OrderId, side: OrderSide, size: Size, price: Price, place_ts: i64) -> Self {
        Self {
            order_id,
            side,
            size,
            price,
            place_ts,
        }
    }

    /// Age of the order at `now`.
    #[inline]
    pub fn age_ns(&self, now: i64) -> i64 {
        now - self.place_ts
    }
}

/// Cancellation request issued by the strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRecord {
    /// Order being cancelled.
    pub order_id: OrderId,
    /// Timestamp the cancel was issued (nanoseconds).
    pub cancel_ts: i64,
}

impl CancelRecord {
    #[must_use]
    pub fn new(order_id: OrderId, cancel_ts: i64) -> Self {
        Self {
            order_id,
            cancel_ts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_age() {
        let order = Order::new(
            OrderId::new(1),
            OrderSide::Buy,
            Size::new(dec!(0.001)),
            Price::new(dec!(99.2)),
            1_000,
        );
        assert_eq!(order.age_ns(4_500), 3_500);
    }
}
