//! Structured logging for futbot.
//!
//! Every run appends its order attempts, successes and failures to a log
//! file; the console only shows log events when verbose output is asked for.

pub mod error;
pub mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{init_logging, ConsoleOptions, LoggingConfig};
