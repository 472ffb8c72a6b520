//! Order event reporting.
//!
//! Submission code never writes to the console or a global logger
//! directly; it reports through whatever `Reporter` the caller passes in.

use futbot_core::{OrderRequest, OrderResult};
use futbot_exchange::ExchangeError;
use tracing::{error, info};

/// Sink for order lifecycle events.
pub trait Reporter: Send + Sync {
    /// About to send `order`.
    fn attempt(&self, order: &OrderRequest);

    /// The exchange accepted `order`.
    fn success(&self, order: &OrderRequest, result: &OrderResult);

    /// `order` failed, either locally or at the exchange.
    fn failure(&self, order: &OrderRequest, error: &ExchangeError);
}

/// Reporter writing structured `tracing` events (the log file sink).
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn attempt(&self, order: &OrderRequest) {
        info!(
            symbol = %order.symbol,
            side = %order.side,
            order_type = %order.order_type,
            quantity = %order.quantity,
            price = ?order.price.map(|p| p.to_string()),
            stop_price = ?order.stop_price.map(|p| p.to_string()),
            reduce_only = order.reduce_only,
            "Attempting to place {order}"
        );
    }

    fn success(&self, order: &OrderRequest, result: &OrderResult) {
        info!(
            order_id = result.order_id,
            symbol = %result.symbol,
            side = %result.side,
            order_type = %result.order_type,
            status = %result.status,
            "SUCCESS: {} order placed",
            order.order_type
        );
    }

    fn failure(&self, order: &OrderRequest, error: &ExchangeError) {
        error!(
            symbol = %order.symbol,
            order_type = %order.order_type,
            code = ?error.api_code(),
            "API ERROR placing {} order: {error}",
            order.order_type
        );
    }
}

/// Recorded reporter event.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEvent {
    Attempt(OrderRequest),
    Success { order: OrderRequest, order_id: i64 },
    Failure { order: OrderRequest, message: String },
}

/// Reporter keeping events in memory, for tests.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: parking_lot::Mutex<Vec<ReportEvent>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<ReportEvent> {
        self.events.lock().clone()
    }
}

impl Reporter for RecordingReporter {
    fn attempt(&self, order: &OrderRequest) {
        self.events.lock().push(ReportEvent::Attempt(order.clone()));
    }

    fn success(&self, order: &OrderRequest, result: &OrderResult) {
        self.events.lock().push(ReportEvent::Success {
            order: order.clone(),
            order_id: result.order_id,
        });
    }

    fn failure(&self, order: &OrderRequest, error: &ExchangeError) {
        self.events.lock().push(ReportEvent::Failure {
            order: order.clone(),
            message: error.to_string(),
        });
    }
}
