//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Script decode error: {0}")]
    Script(#[from] serde_json::Error),

    #[error("Strategy error: {0}")]
    Strategy(#[from] stoikov_mm::StrategyError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type AppResult<T> = Result<T, AppError>;
