//! Executor error types.

use futbot_core::{CoreError, OrderResult};
use futbot_exchange::{ErrorKind, ExchangeError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OcoError {
    /// A leg could not be derived; nothing was sent.
    #[error("Invalid OCO request: {0}")]
    InvalidRequest(#[from] CoreError),

    /// The take-profit leg was rejected; the stop-loss leg was never sent.
    #[error("Take-profit order failed: {0}")]
    TakeProfitFailed(#[source] ExchangeError),

    /// The stop-loss leg was rejected after the take-profit leg was placed.
    /// `take_profit` is still live on the exchange.
    #[error(
        "Stop-loss order failed: {source} (take-profit order {} is still open)",
        .take_profit.order_id
    )]
    StopLossFailed {
        take_profit: Box<OrderResult>,
        #[source]
        source: ExchangeError,
    },
}

impl OcoError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::Config,
            Self::TakeProfitFailed(e) | Self::StopLossFailed { source: e, .. } => e.kind(),
        }
    }

    /// The order left live on the exchange, if any.
    pub fn live_order(&self) -> Option<&OrderResult> {
        match self {
            Self::StopLossFailed { take_profit, .. } => Some(take_profit.as_ref()),
            _ => None,
        }
    }

    /// Underlying exchange error, if the failure came from the exchange.
    pub fn exchange_error(&self) -> Option<&ExchangeError> {
        match self {
            Self::InvalidRequest(_) => None,
            Self::TakeProfitFailed(e) | Self::StopLossFailed { source: e, .. } => Some(e),
        }
    }
}
