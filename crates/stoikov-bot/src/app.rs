//! Dry-run application.
//!
//! Wires the config, the scripted event source and the strategy together and
//! logs the outcome. Nothing is written to disk.

use std::path::Path;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use stoikov_mm::{EventSource, RunSummary, ScriptedEventSource, StoikovStrategy};
use stoikov_telemetry::Metrics;

use crate::config::AppConfig;
use crate::error::AppResult;

/// Main application state.
pub struct Application {
    config: AppConfig,
    strategy: StoikovStrategy,
}

impl Application {
    /// Create the application. Rejects parameters for which the quote
    /// formula is not well defined.
    pub fn new(config: AppConfig) -> AppResult<Self> {
        config.strategy.validate()?;
        let strategy = StoikovStrategy::new(config.strategy.clone());

        Ok(Self { config, strategy })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn strategy(&self) -> &StoikovStrategy {
        &self.strategy
    }

    /// Decode the configured event script.
    pub fn load_script(&self) -> AppResult<ScriptedEventSource> {
        load_script(Path::new(&self.config.script_path))
    }

    /// Replay the configured script to completion.
    pub fn run(&mut self) -> AppResult<RunSummary> {
        let mut source = self.load_script()?;
        info!(
            script_path = %self.config.script_path,
            batches = source.remaining(),
            "Event script loaded"
        );

        let summary = self.run_with_source(&mut source);
        info!(
            placed = source.placed().len(),
            cancels = source.cancels().len(),
            "Scripted source finished"
        );
        Ok(summary)
    }

    /// Run the strategy against any event source and log the result.
    pub fn run_with_source<S>(&mut self, source: &mut S) -> RunSummary
    where
        S: EventSource + ?Sized,
    {
        let output = self.strategy.run(source);
        let summary = self.strategy.summary(&output);

        let unrealized_pnl = self
            .strategy
            .best_prices()
            .mid()
            .map(|mid| self.strategy.inventory_manager().unrealized_pnl(mid))
            .unwrap_or(Decimal::ZERO);

        info!(
            md_updates = summary.md_updates,
            fills = summary.fills,
            orders_placed = summary.orders_placed,
            timeout_cancels = summary.timeout_cancels,
            resting_at_end = summary.resting_at_end,
            inventory = %summary.final_inventory,
            realized_pnl = %summary.realized_pnl,
            unrealized_pnl = %unrealized_pnl,
            "Dry run complete"
        );

        match Metrics::render() {
            Ok(text) => debug!(metrics = %text, "Final metrics"),
            Err(e) => warn!(error = %e, "Failed to render metrics"),
        }

        summary
    }
}

/// Read and decode a JSON event script.
pub fn load_script(path: &Path) -> AppResult<ScriptedEventSource> {
    let raw = std::fs::read_to_string(path)?;
    Ok(ScriptedEventSource::from_json(&raw)?)
}
