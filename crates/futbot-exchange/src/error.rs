//! Exchange error types.

use futbot_core::CoreError;
use thiserror::Error;

/// Coarse classification used by the CLI for messages and exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credentials/parameters, raised before any network call.
    Config,
    /// The session probe failed.
    Connection,
    /// The exchange rejected, or never answered, an order request.
    Exchange,
}

#[derive(Debug, Clone, Error)]
pub enum ExchangeError {
    #[error("{0}")]
    Config(String),

    #[error("Invalid order request: {0}")]
    InvalidRequest(#[from] CoreError),

    #[error("Connection check failed: {0}")]
    Connection(Box<ExchangeError>),

    /// Structured rejection from the exchange (`{"code": .., "msg": ..}`).
    #[error("APIError(code={code}): {msg}")]
    Api { code: i64, msg: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    Transport(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl ExchangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Config(_) | Self::InvalidRequest(_) => ErrorKind::Config,
            Self::Connection(_) => ErrorKind::Connection,
            Self::Api { .. } | Self::Http { .. } | Self::Transport(_) | Self::Decode(_) => {
                ErrorKind::Exchange
            }
        }
    }

    /// Exchange error code, if the failure carried one.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            Self::Connection(inner) => inner.api_code(),
            _ => None,
        }
    }
}

pub type ExchangeResult<T> = Result<T, ExchangeError>;
