//! Order submitter.

use futbot_core::{OrderRequest, OrderResult};
use futbot_exchange::{ExchangeError, ExchangeResult, Session};

use crate::reporter::Reporter;

/// Send exactly one order.
///
/// The type invariant is re-checked first so a hand-assembled request can
/// never reach the network. Everything else (tick size, notional, margin)
/// is the exchange's call and comes back as `ExchangeError::Api`.
///
/// No retry: a timeout after the request left may still have created the
/// order, and re-sending could duplicate it.
pub async fn submit(
    session: &Session,
    order: &OrderRequest,
    reporter: &dyn Reporter,
) -> ExchangeResult<OrderResult> {
    if let Err(e) = order.validate() {
        let err = ExchangeError::InvalidRequest(e);
        reporter.failure(order, &err);
        return Err(err);
    }

    reporter.attempt(order);
    match session.api().place_order(order).await {
        Ok(result) => {
            reporter.success(order, &result);
            Ok(result)
        }
        Err(e) => {
            reporter.failure(order, &e);
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporter::{RecordingReporter, ReportEvent};
    use futbot_core::{OrderSide, OrderType, Price, Size, Symbol};
    use futbot_exchange::{ErrorKind, MockExchange, Session};
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    async fn session_with(mock: Arc<MockExchange>) -> Session {
        Session::open(mock).await.unwrap()
    }

    fn btc_market() -> OrderRequest {
        OrderRequest::market(
            Symbol::new("BTCUSDT").unwrap(),
            OrderSide::Buy,
            Size::new(dec!(0.01)),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_market_order_echoed_as_filled() {
        let mock = Arc::new(
            MockExchange::new()
                .with_status("FILLED")
                .with_first_order_id(12345),
        );
        let session = session_with(mock.clone()).await;
        let reporter = RecordingReporter::new();

        let result = submit(&session, &btc_market(), &reporter).await.unwrap();

        assert_eq!(result.order_id, 12345);
        assert_eq!(result.status, "FILLED");
        assert_eq!(mock.placed_orders().len(), 1);
        assert_eq!(
            reporter.events(),
            vec![
                ReportEvent::Attempt(btc_market()),
                ReportEvent::Success {
                    order: btc_market(),
                    order_id: 12345
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_limit_order_passes_price_through() {
        let mock = Arc::new(MockExchange::new());
        let session = session_with(mock.clone()).await;
        let order = OrderRequest::limit(
            Symbol::new("BTCUSDT").unwrap(),
            OrderSide::Sell,
            Size::new(dec!(0.5)),
            Price::new(dec!(70000)),
        )
        .unwrap();

        let result = submit(&session, &order, &RecordingReporter::new())
            .await
            .unwrap();

        assert_eq!(result.price, Some(Price::new(dec!(70000))));
        assert_eq!(result.status, "NEW");
        assert_eq!(mock.placed_orders(), vec![order]);
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_exchange() {
        let mock = Arc::new(MockExchange::new());
        let session = session_with(mock.clone()).await;
        let reporter = RecordingReporter::new();

        let mut order = btc_market();
        order.order_type = OrderType::Limit; // no price, no timeInForce

        let err = submit(&session, &order, &reporter).await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(mock.placed_orders().is_empty());
        assert!(matches!(
            reporter.events().as_slice(),
            [ReportEvent::Failure { .. }]
        ));
    }

    #[tokio::test]
    async fn test_rejection_surfaces_once_without_retry() {
        let mock = Arc::new(MockExchange::new());
        mock.push_rejection(-4164, "Order's notional must be no smaller than 100");
        let session = session_with(mock.clone()).await;
        let reporter = RecordingReporter::new();

        let err = submit(&session, &btc_market(), &reporter).await.unwrap_err();

        assert_eq!(err.api_code(), Some(-4164));
        assert_eq!(err.kind(), ErrorKind::Exchange);
        assert_eq!(mock.placed_orders().len(), 1);
        assert!(matches!(
            reporter.events().last(),
            Some(ReportEvent::Failure { message, .. }) if message.contains("-4164")
        ));
    }
}
