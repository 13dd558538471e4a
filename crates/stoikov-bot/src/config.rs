//! Application configuration.

use serde::{Deserialize, Serialize};
use stoikov_mm::StoikovConfig;

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "STOIKOV_CONFIG";

/// Config file used when neither the CLI nor the environment names one.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Top-level configuration for a dry run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Quote parameters.
    pub strategy: StoikovConfig,

    /// JSON event script to replay (array of event batches).
    pub script_path: String,
}

impl AppConfig {
    /// Load from a specific file.
    pub fn from_file(path: &str) -> AppResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config {path}: {e}")))?;

        Self::from_toml(&content)
    }

    /// Parse from TOML text.
    pub fn from_toml(content: &str) -> AppResult<Self> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Replace the script path (CLI override).
    #[must_use]
    pub fn with_script_path(mut self, script_path: impl Into<String>) -> Self {
        self.script_path = script_path.into();
        self
    }
}

/// Resolve the config path: CLI arg > `STOIKOV_CONFIG` > default.
pub fn resolve_config_path(cli: Option<String>) -> String {
    resolve_with(cli, std::env::var(CONFIG_ENV_VAR).ok())
}

fn resolve_with(cli: Option<String>, env: Option<String>) -> String {
    cli.or(env).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string())
}
