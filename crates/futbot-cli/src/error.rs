//! Application error types.

use futbot_core::{CoreError, OrderResult};
use futbot_exchange::{ErrorKind, ExchangeError};
use futbot_executor::OcoError;
use futbot_telemetry::TelemetryError;
use thiserror::Error;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: u8 = 0;
    pub const CONFIG: u8 = 2;
    pub const CONNECTION: u8 = 3;
    pub const EXCHANGE: u8 = 4;
    /// Take-profit placed, stop-loss rejected.
    pub const PARTIAL_OCO: u8 = 5;
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Config(String),

    #[error("Invalid order: {0}")]
    Order(#[from] CoreError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Oco(#[from] OcoError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::Order(_) | Self::Telemetry(_) => ErrorKind::Config,
            Self::Exchange(e) => e.kind(),
            Self::Oco(e) => e.kind(),
        }
    }

    /// Order left live on the exchange despite the failure.
    pub fn live_order(&self) -> Option<&OrderResult> {
        match self {
            Self::Oco(e) => e.live_order(),
            _ => None,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.live_order().is_some()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_partial() {
            return exit_code::PARTIAL_OCO;
        }
        match self.kind() {
            ErrorKind::Config => exit_code::CONFIG,
            ErrorKind::Connection => exit_code::CONNECTION,
            ErrorKind::Exchange => exit_code::EXCHANGE,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
