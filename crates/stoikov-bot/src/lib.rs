//! Stoikov market maker dry-run harness.
//!
//! Loads a TOML configuration, replays a recorded JSON event script through
//! `StoikovStrategy` and reports what the strategy did:
//! - Config loading and validation
//! - Script decoding into a `ScriptedEventSource`
//! - Run summary logging and metrics dump

pub mod app;
pub mod config;
pub mod error;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};
