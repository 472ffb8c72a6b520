//! Exchange capability trait.
//!
//! The order layer only ever needs two things from the exchange: a
//! read-only liveness/credential check and single order placement. Keeping
//! the trait this narrow lets every component run against
//! [`MockExchange`](crate::MockExchange) in tests.

use std::pin::Pin;
use std::sync::Arc;

use futbot_core::{OrderRequest, OrderResult};
use serde::Deserialize;

use crate::error::ExchangeResult;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Subset of the account response returned by the probe.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountSnapshot {
    #[serde(default)]
    pub can_trade: bool,
    #[serde(default)]
    pub total_wallet_balance: Option<String>,
    #[serde(default)]
    pub available_balance: Option<String>,
}

/// Authenticated exchange operations.
pub trait ExchangeApi: Send + Sync {
    /// Authenticated read-only request confirming endpoint and credentials.
    fn probe(&self) -> BoxFuture<'_, ExchangeResult<AccountSnapshot>>;

    /// Place exactly one order. Implementations must not retry.
    fn place_order<'a>(&'a self, order: &'a OrderRequest) -> BoxFuture<'a, ExchangeResult<OrderResult>>;

    /// Base URL the implementation talks to.
    fn base_url(&self) -> &str;
}

/// Arc wrapper for ExchangeApi trait objects.
pub type DynExchangeApi = Arc<dyn ExchangeApi>;
