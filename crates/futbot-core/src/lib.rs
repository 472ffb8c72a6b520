//! Core order types for futbot.
//!
//! This crate provides the types shared by every layer of the order CLI:
//! - `Price`, `Size`: Precision-safe numeric types
//! - `Symbol`: Normalized exchange instrument id
//! - `OrderSide`, `OrderType`, `TimeInForce`: Trading enums
//! - `OrderRequest`, `OcoRequest`: Validated order parameters
//! - `OrderResult`, `OcoResult`: Exchange responses passed through to the presenter

pub mod decimal;
pub mod error;
pub mod order;
pub mod request;
pub mod result;

pub use decimal::{Price, Size};
pub use error::{CoreError, Result};
pub use order::{ClientOrderId, OrderSide, OrderType, TimeInForce};
pub use request::{OcoRequest, OrderRequest, OrderRequestBuilder, Symbol};
pub use result::{OcoResult, OrderResult};
