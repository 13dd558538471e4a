//! Prometheus metrics and structured logging for the Stoikov market maker.
//!
//! - Prometheus metrics for quotes, cancels, fills and inventory
//! - Structured logging with tracing (JSON in production)

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;
