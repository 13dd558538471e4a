//! Market data and event types delivered by the event source.
//!
//! Contains the top-of-book snapshot (`Bbo`), anonymous market trades,
//! own-trade notifications and the `Event` sum type the strategy consumes,
//! plus the best-price merge rule.
//!
//! All timestamps are nanoseconds in the event source's clock.

use serde::{Deserialize, Serialize};

use crate::{OrderId, OrderSide, Price, Size};

/// BBO state (null side detection).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BboState {
    /// Both bid and ask are present and bid < ask.
    Valid,
    /// No bid side (bid price or size is zero or missing).
    NoBid,
    /// No ask side (ask price or size is zero or missing).
    NoAsk,
    /// Both sides missing.
    Empty,
    /// Both sides present but crossed or locked.
    Invalid,
}

impl std::fmt::Display for BboState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Valid => write!(f, "VALID"),
            Self::NoBid => write!(f, "NO_BID"),
            Self::NoAsk => write!(f, "NO_ASK"),
            Self::Empty => write!(f, "EMPTY"),
            Self::Invalid => write!(f, "INVALID"),
        }
    }
}

/// Best Bid and Offer as reported by a market-data update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bbo {
    /// Best bid price.
    pub bid_price: Price,
    /// Best bid size.
    pub bid_size: Size,
    /// Best ask price.
    pub ask_price: Price,
    /// Best ask size.
    pub ask_size: Size,
}

impl Bbo {
    /// Create a new BBO.
    pub fn new(bid_price: Price, bid_size: Size, ask_price: Price, ask_size: Size) -> Self {
        Self {
            bid_price,
            bid_size,
            ask_price,
            ask_size,
        }
    }

    /// Whether the bid side carries a usable level.
    pub fn has_bid(&self) -> bool {
        self.bid_price.is_positive() && self.bid_size.is_positive()
    }

    /// Whether the ask side carries a usable level.
    pub fn has_ask(&self) -> bool {
        self.ask_price.is_positive() && self.ask_size.is_positive()
    }

    /// Get BBO state.
    pub fn state(&self) -> BboState {
        match (self.has_bid(), self.has_ask()) {
            (false, false) => BboState::Empty,
            (true, false) => BboState::NoAsk,
            (false, true) => BboState::NoBid,
            (true, true) => {
                if self.bid_price < self.ask_price {
                    BboState::Valid
                } else {
                    BboState::Invalid
                }
            }
        }
    }
}

/// Anonymous market trade (someone else's execution).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonTrade {
    /// Aggressor side.
    pub side: OrderSide,
    pub price: Price,
    pub size: Size,
}

/// Market-data update: a book snapshot, a market trade, or both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MdUpdate {
    /// Exchange timestamp.
    pub exchange_ts: i64,
    /// Timestamp the strategy received the update.
    pub receive_ts: i64,
    /// Top-of-book snapshot, if this update carries one.
    #[serde(default)]
    pub bbo: Option<Bbo>,
    /// Market trade, if this update carries one.
    #[serde(default)]
    pub trade: Option<AnonTrade>,
}

impl MdUpdate {
    /// Book snapshot update.
    pub fn book(exchange_ts: i64, receive_ts: i64, bbo: Bbo) -> Self {
        Self {
            exchange_ts,
            receive_ts,
            bbo: Some(bbo),
            trade: None,
        }
    }

    /// Market trade update.
    pub fn trade(exchange_ts: i64, receive_ts: i64, trade: AnonTrade) -> Self {
        Self {
            exchange_ts,
            receive_ts,
            bbo: None,
            trade: Some(trade),
        }
    }
}

/// Execution of one of our own orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnTrade {
    /// Placement timestamp of the filled order.
    pub place_ts: i64,
    /// Exchange timestamp of the execution.
    pub exchange_ts: i64,
    /// Timestamp the strategy received the notification.
    pub receive_ts: i64,
    pub trade_id: u64,
    pub order_id: OrderId,
    pub side: OrderSide,
    pub size: Size,
    pub price: Price,
}

/// Event delivered by the event source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    MarketData(MdUpdate),
    OwnTrade(OwnTrade),
}

impl Event {
    /// Timestamp the strategy received this event.
    pub fn receive_ts(&self) -> i64 {
        match self {
            Self::MarketData(md) => md.receive_ts,
            Self::OwnTrade(trade) => trade.receive_ts,
        }
    }
}

impl From<MdUpdate> for Event {
    fn from(md: MdUpdate) -> Self {
        Self::MarketData(md)
    }
}

impl From<OwnTrade> for Event {
    fn from(trade: OwnTrade) -> Self {
        Self::OwnTrade(trade)
    }
}

/// Events that became visible to the strategy at `receive_ts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventBatch {
    pub receive_ts: i64,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl EventBatch {
    pub fn new(receive_ts: i64, events: Vec<Event>) -> Self {
        Self { receive_ts, events }
    }
}

/// Current best prices known to the strategy.
///
/// A side is `None` until the first update that carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestPrices {
    pub bid: Option<Price>,
    pub ask: Option<Price>,
}

impl BestPrices {
    /// Mid price, available once both sides are known.
    pub fn mid(&self) -> Option<Price> {
        match (self.bid, self.ask) {
            (Some(bid), Some(ask)) => Some(Price::mid(bid, ask)),
            _ => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.bid.is_some() && self.ask.is_some()
    }
}

/// Merge a market-data update into the current best prices.
///
/// Each side present in the update's snapshot replaces the previous value;
/// empty sides and trade-only updates keep what was known before.
pub fn update_best_positions(best: BestPrices, md: &MdUpdate) -> BestPrices {
    let Some(bbo) = md.bbo.as_ref() else {
        return best;
    };

    BestPrices {
        bid: if bbo.has_bid() {
            Some(bbo.bid_price)
        } else {
            best.bid
        },
        ask: if bbo.has_ask() {
            Some(bbo.ask_price)
        } else {
            best.ask
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn bbo(bid: rust_decimal::Decimal, ask: rust_decimal::Decimal) -> Bbo {
        Bbo::new(
            Price::new(bid),
            Size::new(dec!(1)),
            Price::new(ask),
            Size::new(dec!(1)),
        )
    }

    #[test]
    fn test_bbo_state_valid() {
        assert_eq!(bbo(dec!(99), dec!(101)).state(), BboState::Valid);
    }

    #[test]
    fn test_bbo_state_missing_sides() {
        assert_eq!(bbo(dec!(0), dec!(101)).state(), BboState::NoBid);
        assert_eq!(bbo(dec!(99), dec!(0)).state(), BboState::NoAsk);
        assert_eq!(bbo(dec!(0), dec!(0)).state(), BboState::Empty);
    }

    #[test]
    fn test_bbo_state_crossed() {
        assert_eq!(bbo(dec!(101), dec!(100)).state(), BboState::Invalid);
        assert_eq!(BboState::Invalid.to_string(), "INVALID");
    }

    #[test]
    fn test_best_prices_start_unknown() {
        let best = BestPrices::default();
        assert!(best.mid().is_none());
        assert!(!best.is_complete());
    }

    #[test]
    fn test_update_best_positions_takes_latest_snapshot() {
        let best = update_best_positions(
            BestPrices::default(),
            &MdUpdate::book(1, 2, bbo(dec!(99), dec!(101))),
        );
        assert_eq!(best.bid, Some(Price::new(dec!(99))));
        assert_eq!(best.ask, Some(Price::new(dec!(101))));
        assert_eq!(best.mid(), Some(Price::new(dec!(100))));

        // A worse bid still replaces the previous one: latest book state wins.
        let best = update_best_positions(best, &MdUpdate::book(3, 4, bbo(dec!(98), dec!(100))));
        assert_eq!(best.bid, Some(Price::new(dec!(98))));
        assert_eq!(best.ask, Some(Price::new(dec!(100))));
    }

    #[test]
    fn test_update_best_positions_keeps_empty_side() {
        let best = update_best_positions(
            BestPrices::default(),
            &MdUpdate::book(1, 2, bbo(dec!(99), dec!(101))),
        );
        let best = update_best_positions(best, &MdUpdate::book(3, 4, bbo(dec!(0), dec!(102))));
        assert_eq!(best.bid, Some(Price::new(dec!(99))));
        assert_eq!(best.ask, Some(Price::new(dec!(102))));
    }

    #[test]
    fn test_update_best_positions_ignores_trades() {
        let before = update_best_positions(
            BestPrices::default(),
            &MdUpdate::book(1, 2, bbo(dec!(99), dec!(101))),
        );
        let trade = AnonTrade {
            side: OrderSide::Buy,
            price: Price::new(dec!(105)),
            size: Size::new(dec!(3)),
        };
        let after = update_best_positions(before, &MdUpdate::trade(3, 4, trade));
        assert_eq!(before, after);
    }

    #[test]
    fn test_event_json_tagging() {
        let raw = r#"{
            "kind": "own_trade",
            "place_ts": 10,
            "exchange_ts": 20,
            "receive_ts": 25,
            "trade_id": 1,
            "order_id": 4,
            "side": "BID",
            "size": "0.001",
            "price": "99.5"
        }"#;
        let event: Event = serde_json::from_str(raw).unwrap();
        match event {
            Event::OwnTrade(trade) => {
                assert_eq!(trade.order_id, OrderId::new(4));
                assert_eq!(trade.side, OrderSide::Buy);
                assert_eq!(trade.size.inner(), dec!(0.001));
            }
            other => panic!("Expected OwnTrade, got {other:?}"),
        }
    }

    #[test]
    fn test_event_unknown_kind_rejected() {
        let raw = r#"{"kind": "funding", "receive_ts": 1}"#;
        assert!(serde_json::from_str::<Event>(raw).is_err());
    }
}
