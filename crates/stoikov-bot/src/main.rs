//! Stoikov market maker - dry-run entry point
//!
//! Replays a recorded event script through the strategy and logs a summary.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use stoikov_bot::config::resolve_config_path;

/// Stoikov market maker dry run
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via STOIKOV_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Event script to replay, overrides `script_path` from the config
    #[arg(short, long)]
    script: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    stoikov_telemetry::init_logging()?;

    info!("Starting Stoikov dry run v{}", env!("CARGO_PKG_VERSION"));

    let config_path = resolve_config_path(args.config);
    info!(config_path = %config_path, "Loading configuration");

    let mut config = stoikov_bot::AppConfig::from_file(&config_path)?;
    if let Some(script) = args.script {
        config = config.with_script_path(script);
    }
    info!(
        gamma = config.strategy.gamma,
        sigma = config.strategy.sigma,
        intensity = config.strategy.intensity,
        script_path = %config.script_path,
        "Configuration loaded"
    );

    let mut app = stoikov_bot::Application::new(config)?;
    app.run()?;

    Ok(())
}
