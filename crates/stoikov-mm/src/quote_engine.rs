//! Quote price calculation engine.
//!
//! Closed-form Avellaneda–Stoikov quotes:
//! - Reservation price: mid shifted against inventory, `r = mid - q·γ·σ²·δ`
//! - Spread: `s = γ·σ²·δ + (2/γ)·ln(1 + γ/k)`
//! - Bid/ask: `r ∓ s/2`
//!
//! `δ` is the remaining fraction of the risk horizon. It is not clamped, so
//! quoting past the horizon end extrapolates the formula.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use stoikov_core::{BestPrices, Price, Size};

use crate::config::StoikovConfig;

/// Quotes for one refresh (both sides).
#[derive(Debug, Clone, PartialEq)]
pub struct QuotePair {
    /// Inventory-adjusted reservation price.
    pub reservation_price: f64,
    /// Full quoted spread.
    pub spread: f64,
    /// Bid price `r - s/2`.
    pub bid_price: Price,
    /// Ask price `r + s/2`.
    pub ask_price: Price,
    /// Size quoted on each side.
    pub size: Size,
}

/// Why no quotes were produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuoteSkip {
    /// One side of the book has never been observed.
    BookIncomplete,
    /// The formula produced a non-finite or unrepresentable price.
    NonFinite { reservation_price: f64, spread: f64 },
}

/// Remaining fraction of the risk horizon: `(T - now) / (T - T₀)`.
#[inline]
pub fn time_fraction(now_ns: i64, horizon_start_ns: i64, horizon_end_ns: i64) -> f64 {
    (horizon_end_ns - now_ns) as f64 / (horizon_end_ns - horizon_start_ns) as f64
}

/// Indifference price around which the maker quotes.
///
/// Long inventory pushes it below mid (encourages selling), short above.
#[inline]
pub fn reservation_price(mid: f64, inventory: f64, gamma: f64, sigma: f64, delta: f64) -> f64 {
    mid - inventory * gamma * sigma.powi(2) * delta
}

/// Full quoted spread.
///
/// The first term scales with remaining risk, the second widens the spread
/// when order arrival intensity `k` is low.
#[inline]
pub fn quoted_spread(gamma: f64, sigma: f64, intensity: f64, delta: f64) -> f64 {
    gamma * sigma.powi(2) * delta + 2.0 / gamma * (gamma / intensity).ln_1p()
}

/// Compute bid/ask quotes at `now_ns`.
///
/// # Arguments
/// * `best` - Current best bid/ask; both sides must be known
/// * `inventory` - Net position (positive = long)
/// * `config` - Quote parameters
/// * `now_ns` - Receive timestamp of the triggering batch
pub fn compute_quotes(
    best: &BestPrices,
    inventory: Decimal,
    config: &StoikovConfig,
    now_ns: i64,
) -> Result<QuotePair, QuoteSkip> {
    let mid = best.mid().ok_or(QuoteSkip::BookIncomplete)?;

    let delta = time_fraction(now_ns, config.horizon_start_ns, config.horizon_end_ns);
    let q = inventory.to_f64().unwrap_or(f64::NAN);

    let r = reservation_price(mid.to_f64(), q, config.gamma, config.sigma, delta);
    let s = quoted_spread(config.gamma, config.sigma, config.intensity, delta);

    let skip = QuoteSkip::NonFinite {
        reservation_price: r,
        spread: s,
    };
    let bid_price = Price::from_f64(r - s / 2.0).ok_or(skip)?;
    let ask_price = Price::from_f64(r + s / 2.0).ok_or(skip)?;

    Ok(QuotePair {
        reservation_price: r,
        spread: s,
        bid_price,
        ask_price,
        size: config.order_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const EPS: f64 = 1e-9;

    fn test_config() -> StoikovConfig {
        StoikovConfig::new(0.1, 2.0, 1.5, 0, 100)
    }

    fn book(bid: Decimal, ask: Decimal) -> BestPrices {
        BestPrices {
            bid: Some(Price::new(bid)),
            ask: Some(Price::new(ask)),
        }
    }

    #[test]
    fn test_time_fraction() {
        assert!((time_fraction(0, 0, 100) - 1.0).abs() < EPS);
        assert!((time_fraction(50, 0, 100) - 0.5).abs() < EPS);
        assert!(time_fraction(100, 0, 100).abs() < EPS);
    }

    #[test]
    fn test_time_fraction_negative_past_horizon() {
        assert!((time_fraction(150, 0, 100) + 0.5).abs() < EPS);
    }

    #[test]
    fn test_reference_values() {
        // best 99/101, q = 2, γ = 0.1, σ = 2, k = 1.5, δ = 0.5
        let r = reservation_price(100.0, 2.0, 0.1, 2.0, 0.5);
        let s = quoted_spread(0.1, 2.0, 1.5, 0.5);

        // r = 100 - 2 * 0.1 * 4 * 0.5 = 99.6
        assert!((r - 99.6).abs() < EPS);
        // s = 0.1 * 4 * 0.5 + 20 * ln(1 + 0.1/1.5)
        let expected_s = 0.2 + 20.0 * (1.0_f64 + 0.1 / 1.5).ln();
        assert!((s - expected_s).abs() < EPS);
        assert!((s - 1.4908).abs() < 1e-3);
    }

    #[test]
    fn test_compute_quotes_reference() {
        let quotes = compute_quotes(&book(dec!(99), dec!(101)), dec!(2), &test_config(), 50)
            .expect("quotes");

        let expected_s = 0.2 + 20.0 * (1.0_f64 + 0.1 / 1.5).ln();
        assert!((quotes.reservation_price - 99.6).abs() < EPS);
        assert!((quotes.spread - expected_s).abs() < EPS);
        assert!((quotes.bid_price.to_f64() - (99.6 - expected_s / 2.0)).abs() < 1e-9);
        assert!((quotes.ask_price.to_f64() - (99.6 + expected_s / 2.0)).abs() < 1e-9);
        assert_eq!(quotes.size, Size::new(dec!(0.001)));
    }

    #[test]
    fn test_flat_inventory_centers_on_mid() {
        let quotes =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(0), &test_config(), 50).unwrap();
        assert!((quotes.reservation_price - 100.0).abs() < EPS);
        let bid_distance = 100.0 - quotes.bid_price.to_f64();
        let ask_distance = quotes.ask_price.to_f64() - 100.0;
        assert!((bid_distance - ask_distance).abs() < 1e-9);
    }

    #[test]
    fn test_long_inventory_lowers_quotes() {
        let flat =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(0), &test_config(), 50).unwrap();
        let long =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(3), &test_config(), 50).unwrap();
        let short =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(-3), &test_config(), 50).unwrap();

        assert!(long.reservation_price < flat.reservation_price);
        assert!(short.reservation_price > flat.reservation_price);
        assert!(long.ask_price < flat.ask_price);
        assert!(short.bid_price > flat.bid_price);
        // Inventory does not change the spread.
        assert!((long.spread - flat.spread).abs() < EPS);
    }

    #[test]
    fn test_spread_narrows_towards_horizon_end() {
        let early =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(0), &test_config(), 0).unwrap();
        let late =
            compute_quotes(&book(dec!(99), dec!(101)), dec!(0), &test_config(), 100).unwrap();
        assert!(late.spread < early.spread);
        // At T only the intensity term remains.
        let intensity_term = 20.0 * (1.0_f64 + 0.1 / 1.5).ln();
        assert!((late.spread - intensity_term).abs() < EPS);
    }

    #[test]
    fn test_lower_intensity_widens_spread() {
        let s_busy = quoted_spread(0.1, 2.0, 10.0, 0.5);
        let s_quiet = quoted_spread(0.1, 2.0, 0.5, 0.5);
        assert!(s_quiet > s_busy);
    }

    #[test]
    fn test_incomplete_book_skips() {
        let best = BestPrices {
            bid: Some(Price::new(dec!(99))),
            ask: None,
        };
        assert_eq!(
            compute_quotes(&best, dec!(0), &test_config(), 50),
            Err(QuoteSkip::BookIncomplete)
        );
    }

    #[test]
    fn test_degenerate_config_skips() {
        let mut config = test_config();
        config.gamma = 0.0;
        let result = compute_quotes(&book(dec!(99), dec!(101)), dec!(1), &config, 50);
        assert!(matches!(result, Err(QuoteSkip::NonFinite { .. })));
    }
}
