//! Error types for futbot-core.

use thiserror::Error;

/// Core error types.
///
/// Every variant is raised before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("Invalid size: {0}")]
    InvalidSize(String),

    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    #[error("Invalid side: {0} (expected BUY or SELL)")]
    InvalidSide(String),

    #[error("Unknown order type: {0}")]
    UnknownOrderType(String),

    #[error("{order_type} order requires {field}")]
    MissingField {
        order_type: &'static str,
        field: &'static str,
    },

    #[error("{order_type} order must not carry {field}")]
    UnexpectedField {
        order_type: &'static str,
        field: &'static str,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
