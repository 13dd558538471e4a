//! Inventory tracking for market making.
//!
//! Tracks the net position of the single quoted instrument, plus traded
//! volume and average-cost PnL.

use rust_decimal::prelude::Signed;
use rust_decimal::Decimal;

use stoikov_core::{OrderSide, Price, Size};

/// Net position and fill statistics.
#[derive(Debug, Clone, Default)]
pub struct InventoryManager {
    /// Net position size (positive = long, negative = short).
    net_size: Decimal,
    /// Average entry price of current inventory.
    avg_entry: Decimal,
    /// Total number of fills processed.
    fill_count: u64,
    /// Total bought size.
    buy_volume: Decimal,
    /// Total sold size.
    sell_volume: Decimal,
    /// Realized PnL in quote currency.
    realized_pnl: Decimal,
}

impl InventoryManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fill and update inventory.
    pub fn record_fill(&mut self, side: OrderSide, price: Price, size: Size) {
        let fill_size = size.inner();
        let fill_price = price.inner();
        let signed_size = size.signed(side);

        let old_size = self.net_size;
        let new_size = old_size + signed_size;

        // Reducing position: realize PnL against the average entry
        if (old_size > Decimal::ZERO && signed_size < Decimal::ZERO)
            || (old_size < Decimal::ZERO && signed_size > Decimal::ZERO)
        {
            let reduce_amount = signed_size.abs().min(old_size.abs());
            let pnl = if old_size > Decimal::ZERO {
                (fill_price - self.avg_entry) * reduce_amount
            } else {
                (self.avg_entry - fill_price) * reduce_amount
            };
            self.realized_pnl += pnl;
        }

        if new_size.is_zero() {
            self.avg_entry = Decimal::ZERO;
        } else if new_size.signum() != old_size.signum() && !old_size.is_zero() {
            // Position flipped: remainder was opened at the fill price
            self.avg_entry = fill_price;
        } else if new_size.signum() == signed_size.signum() || old_size.is_zero() {
            // Adding to position or new position: weighted average
            let old_notional = old_size.abs() * self.avg_entry;
            let new_notional = fill_size * fill_price;
            self.avg_entry = (old_notional + new_notional) / new_size.abs();
        }
        // else: reducing position, avg_entry stays the same

        match side {
            OrderSide::Buy => self.buy_volume += fill_size,
            OrderSide::Sell => self.sell_volume += fill_size,
        }
        self.net_size = new_size;
        self.fill_count += 1;
    }

    /// Net position (positive = long).
    pub fn net_size(&self) -> Decimal {
        self.net_size
    }

    pub fn avg_entry(&self) -> Decimal {
        self.avg_entry
    }

    pub fn fill_count(&self) -> u64 {
        self.fill_count
    }

    pub fn buy_volume(&self) -> Decimal {
        self.buy_volume
    }

    pub fn sell_volume(&self) -> Decimal {
        self.sell_volume
    }

    pub fn realized_pnl(&self) -> Decimal {
        self.realized_pnl
    }

    /// Mark-to-market PnL of the open position.
    pub fn unrealized_pnl(&self, mark_px: Price) -> Decimal {
        if self.net_size.is_zero() {
            return Decimal::ZERO;
        }
        (mark_px.inner() - self.avg_entry) * self.net_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fill(mgr: &mut InventoryManager, side: OrderSide, price: Decimal, size: Decimal) {
        mgr.record_fill(side, Price::new(price), Size::new(size));
    }

    #[test]
    fn test_buy_creates_long_inventory() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Buy, dec!(50), dec!(1));

        assert_eq!(mgr.net_size(), dec!(1));
        assert_eq!(mgr.avg_entry(), dec!(50));
        assert_eq!(mgr.fill_count(), 1);
    }

    #[test]
    fn test_sell_creates_short_inventory() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Sell, dec!(50), dec!(1));

        assert_eq!(mgr.net_size(), dec!(-1));
        assert_eq!(mgr.avg_entry(), dec!(50));
    }

    #[test]
    fn test_net_size_is_buys_minus_sells() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Buy, dec!(100), dec!(0.003));
        fill(&mut mgr, OrderSide::Sell, dec!(101), dec!(0.001));
        fill(&mut mgr, OrderSide::Buy, dec!(99), dec!(0.002));
        fill(&mut mgr, OrderSide::Sell, dec!(100), dec!(0.005));

        assert_eq!(mgr.buy_volume(), dec!(0.005));
        assert_eq!(mgr.sell_volume(), dec!(0.006));
        assert_eq!(mgr.net_size(), mgr.buy_volume() - mgr.sell_volume());
        assert_eq!(mgr.fill_count(), 4);
    }

    #[test]
    fn test_buy_then_sell_closes_position() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Buy, dec!(50), dec!(1));
        fill(&mut mgr, OrderSide::Sell, dec!(52), dec!(1));

        assert_eq!(mgr.net_size(), dec!(0));
        assert_eq!(mgr.avg_entry(), dec!(0));
        // PnL = (52 - 50) * 1 = 2
        assert_eq!(mgr.realized_pnl(), dec!(2));
    }

    #[test]
    fn test_short_then_buy_pnl() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Sell, dec!(52), dec!(1));
        fill(&mut mgr, OrderSide::Buy, dec!(50), dec!(1));

        assert_eq!(mgr.net_size(), dec!(0));
        assert_eq!(mgr.realized_pnl(), dec!(2));
    }

    #[test]
    fn test_position_flip_resets_entry() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Buy, dec!(100), dec!(1));
        fill(&mut mgr, OrderSide::Sell, dec!(103), dec!(3));

        assert_eq!(mgr.net_size(), dec!(-2));
        assert_eq!(mgr.avg_entry(), dec!(103));
        assert_eq!(mgr.realized_pnl(), dec!(3));
    }

    #[test]
    fn test_avg_entry_weighted() {
        let mut mgr = InventoryManager::new();
        fill(&mut mgr, OrderSide::Buy, dec!(100), dec!(1));
        fill(&mut mgr, OrderSide::Buy, dec!(110), dec!(1));

        // avg = (1*100 + 1*110) / 2 = 105
        assert_eq!(mgr.avg_entry(), dec!(105));
        assert_eq!(mgr.net_size(), dec!(2));
    }

    #[test]
    fn test_unrealized_pnl() {
        let mut mgr = InventoryManager::new();
        assert_eq!(mgr.unrealized_pnl(Price::new(dec!(100))), dec!(0));

        fill(&mut mgr, OrderSide::Sell, dec!(100), dec!(2));
        // Short 2 @ 100, mark 98 → +4
        assert_eq!(mgr.unrealized_pnl(Price::new(dec!(98))), dec!(4));
    }
}
