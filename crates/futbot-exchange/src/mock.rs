//! In-memory exchange stub.
//!
//! Echoes accepted orders back as `OrderResult`s and records every call so
//! tests can assert on exactly what reached the exchange.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicI64, Ordering};

use futbot_core::{OrderRequest, OrderResult, Size};

use crate::api::{AccountSnapshot, BoxFuture, ExchangeApi};
use crate::error::{ExchangeError, ExchangeResult};

/// One recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Probe,
    PlaceOrder(OrderRequest),
}

/// Mock exchange for testing.
#[derive(Debug)]
pub struct MockExchange {
    /// Recorded calls for verification.
    calls: parking_lot::Mutex<Vec<MockCall>>,
    /// Scripted outcomes for upcoming `place_order` calls; empty means accept.
    outcomes: parking_lot::Mutex<VecDeque<Option<ExchangeError>>>,
    probe_error: parking_lot::Mutex<Option<ExchangeError>>,
    /// Status echoed for accepted orders.
    status: parking_lot::Mutex<String>,
    next_order_id: AtomicI64,
}

impl Default for MockExchange {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExchange {
    pub const BASE_URL: &'static str = "mock://exchange";

    /// Create a mock that accepts everything with status `NEW`.
    pub fn new() -> Self {
        Self {
            calls: parking_lot::Mutex::new(Vec::new()),
            outcomes: parking_lot::Mutex::new(VecDeque::new()),
            probe_error: parking_lot::Mutex::new(None),
            status: parking_lot::Mutex::new("NEW".to_string()),
            next_order_id: AtomicI64::new(1),
        }
    }

    /// Echo accepted orders with this status.
    pub fn with_status(self, status: impl Into<String>) -> Self {
        *self.status.lock() = status.into();
        self
    }

    /// First order id handed out; later orders count up from it.
    pub fn with_first_order_id(self, id: i64) -> Self {
        self.next_order_id.store(id, Ordering::SeqCst);
        self
    }

    /// Make the probe fail with `error`.
    pub fn fail_probe(&self, error: ExchangeError) {
        *self.probe_error.lock() = Some(error);
    }

    /// Accept the next unscripted `place_order` call.
    pub fn push_accept(&self) {
        self.outcomes.lock().push_back(None);
    }

    /// Reject the next unscripted `place_order` call with an API error.
    pub fn push_rejection(&self, code: i64, msg: impl Into<String>) {
        self.outcomes.lock().push_back(Some(ExchangeError::Api {
            code,
            msg: msg.into(),
        }));
    }

    /// Get recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().clone()
    }

    /// Orders that reached the exchange, in order.
    pub fn placed_orders(&self) -> Vec<OrderRequest> {
        self.calls
            .lock()
            .iter()
            .filter_map(|c| match c {
                MockCall::PlaceOrder(order) => Some(order.clone()),
                MockCall::Probe => None,
            })
            .collect()
    }

    pub fn probe_count(&self) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|c| matches!(c, MockCall::Probe))
            .count()
    }

    fn echo(&self, order: &OrderRequest) -> OrderResult {
        let status = self.status.lock().clone();
        let executed = if status == "FILLED" {
            order.quantity
        } else {
            Size::ZERO
        };
        OrderResult {
            order_id: self.next_order_id.fetch_add(1, Ordering::SeqCst),
            symbol: order.symbol.to_string(),
            side: order.side,
            order_type: order.order_type.to_string(),
            status,
            price: order.price,
            stop_price: order.stop_price,
            orig_qty: Some(order.quantity),
            executed_qty: Some(executed),
            avg_price: None,
            reduce_only: order.reduce_only,
            time_in_force: order.time_in_force.map(|t| t.to_string()),
            client_order_id: order.client_order_id.as_ref().map(|id| id.to_string()),
            update_time: Some(chrono::Utc::now().timestamp_millis()),
            extra: serde_json::Map::new(),
        }
    }
}

impl ExchangeApi for MockExchange {
    fn probe(&self) -> BoxFuture<'_, ExchangeResult<AccountSnapshot>> {
        Box::pin(async move {
            self.calls.lock().push(MockCall::Probe);
            match self.probe_error.lock().clone() {
                Some(err) => Err(err),
                None => Ok(AccountSnapshot {
                    can_trade: true,
                    ..Default::default()
                }),
            }
        })
    }

    fn place_order<'a>(&'a self, order: &'a OrderRequest) -> BoxFuture<'a, ExchangeResult<OrderResult>> {
        Box::pin(async move {
            self.calls.lock().push(MockCall::PlaceOrder(order.clone()));
            let scripted = self.outcomes.lock().pop_front().flatten();
            match scripted {
                Some(err) => Err(err),
                None => Ok(self.echo(order)),
            }
        })
    }

    fn base_url(&self) -> &str {
        Self::BASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futbot_core::{OrderSide, Symbol};
    use rust_decimal_macros::dec;

    fn market() -> OrderRequest {
        OrderRequest::market(
            Symbol::new("BTCUSDT").unwrap(),
            OrderSide::Buy,
            Size::new(dec!(0.01)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_mock_echoes_order() {
        let mock = MockExchange::new()
            .with_status("FILLED")
            .with_first_order_id(12345);

        let result = mock.place_order(&market()).await.unwrap();
        assert_eq!(result.order_id, 12345);
        assert_eq!(result.status, "FILLED");
        assert_eq!(result.symbol, "BTCUSDT");
        assert_eq!(result.executed_qty, Some(Size::new(dec!(0.01))));
        assert_eq!(mock.placed_orders(), vec![market()]);
    }

    #[tokio::test]
    async fn test_mock_scripted_outcomes_in_order() {
        let mock = MockExchange::new();
        mock.push_accept();
        mock.push_rejection(-2019, "Margin is insufficient.");

        assert!(mock.place_order(&market()).await.is_ok());
        let err = mock.place_order(&market()).await.unwrap_err();
        assert_eq!(err.api_code(), Some(-2019));
        // Queue drained: back to accepting.
        assert!(mock.place_order(&market()).await.is_ok());
        assert_eq!(mock.placed_orders().len(), 3);
    }

    #[tokio::test]
    async fn test_mock_probe_failure_recorded() {
        let mock = MockExchange::new();
        mock.fail_probe(ExchangeError::Api {
            code: -2015,
            msg: "Invalid API-key, IP, or permissions for action.".into(),
        });

        assert!(mock.probe().await.is_err());
        assert_eq!(mock.probe_count(), 1);
        assert_eq!(mock.calls(), vec![MockCall::Probe]);
    }
}
