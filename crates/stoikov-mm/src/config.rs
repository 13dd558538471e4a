//! Stoikov strategy configuration.
//!
//! All durations and horizon bounds are nanoseconds in the event source's clock.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stoikov_core::Size;

use crate::error::{StrategyError, StrategyResult};

/// Lower bound of the default hold time: 10 seconds.
pub const MIN_DEFAULT_HOLD_TIME_NS: i64 = 10_000_000_000;

/// Quote parameters, fixed for the lifetime of a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoikovConfig {
    /// Risk aversion γ.
    pub gamma: f64,

    /// Volatility estimate σ (price units per unit of horizon).
    pub sigma: f64,

    /// Order arrival intensity k.
    pub intensity: f64,

    /// Horizon start T₀.
    pub horizon_start_ns: i64,

    /// Horizon end T. Inventory risk decays linearly to zero at T.
    pub horizon_end_ns: i64,

    /// Minimum interval between two quote refreshes.
    #[serde(default)]
    pub delay_ns: i64,

    /// Maximum resting time before an order is cancelled.
    /// When unset: `max(5 * delay_ns, 10s)`.
    #[serde(default)]
    pub hold_time_ns: Option<i64>,

    /// Size of each quote order.
    #[serde(default = "default_order_size")]
    pub order_size: Size,
}

fn default_order_size() -> Size {
    Size::new(Decimal::new(1, 3)) // 0.001
}

impl StoikovConfig {
    /// Create a config with zero delay, default hold time and default order size.
    pub fn new(
        gamma: f64,
        sigma: f64,
        intensity: f64,
        horizon_start_ns: i64,
        horizon_end_ns: i64,
    ) -> Self {
        Self {
            gamma,
            sigma,
            intensity,
            horizon_start_ns,
            horizon_end_ns,
            delay_ns: 0,
            hold_time_ns: None,
            order_size: default_order_size(),
        }
    }

    #[must_use]
    pub fn with_delay_ns(mut self, delay_ns: i64) -> Self {
        self.delay_ns = delay_ns;
        self
    }

    #[must_use]
    pub fn with_hold_time_ns(mut self, hold_time_ns: i64) -> Self {
        self.hold_time_ns = Some(hold_time_ns);
        self
    }

    #[must_use]
    pub fn with_order_size(mut self, order_size: Size) -> Self {
        self.order_size = order_size;
        self
    }

    /// Effective hold time.
    pub fn hold_time(&self) -> i64 {
        self.hold_time_ns
            .unwrap_or_else(|| self.delay_ns.saturating_mul(5).max(MIN_DEFAULT_HOLD_TIME_NS))
    }

    /// Check that the pricing formula is well defined for these parameters.
    ///
    /// The strategy itself accepts any values; callers that want protection
    /// against non-finite quotes should call this before construction.
    pub fn validate(&self) -> StrategyResult<()> {
        for (name, value) in [
            ("gamma", self.gamma),
            ("sigma", self.sigma),
            ("intensity", self.intensity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(StrategyError::InvalidConfig(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }

        if self.horizon_end_ns <= self.horizon_start_ns {
            return Err(StrategyError::InvalidConfig(format!(
                "horizon end ({}) must be after horizon start ({})",
                self.horizon_end_ns, self.horizon_start_ns
            )));
        }

        if self.delay_ns < 0 {
            return Err(StrategyError::InvalidConfig(format!(
                "delay_ns must be non-negative, got {}",
                self.delay_ns
            )));
        }

        if let Some(hold) = self.hold_time_ns {
            if hold < 0 {
                return Err(StrategyError::InvalidConfig(format!(
                    "hold_time_ns must be non-negative, got {hold}"
                )));
            }
        }

        if !self.order_size.is_positive() {
            return Err(StrategyError::InvalidConfig(format!(
                "order_size must be positive, got {}",
                self.order_size
            )));
        }

        Ok(())
    }
}
