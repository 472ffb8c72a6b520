//! End-to-end command tests: parsed command line through the application
//! against the in-memory exchange, rendered by the presenter.

use std::sync::Arc;

use clap::Parser;
use futbot_cli::error::exit_code;
use futbot_cli::{AppConfig, Application, Cli, Presenter};
use futbot_exchange::{MockCall, MockExchange, Session};
use futbot_executor::RecordingReporter;

async fn run(args: &[&str], mock: &Arc<MockExchange>) -> (String, u8) {
    let cli = Cli::try_parse_from(std::iter::once("futbot").chain(args.iter().copied()))
        .expect("arguments should parse");
    let app = Application::new(AppConfig::default()).with_reporter(Arc::new(RecordingReporter::new()));
    let presenter = Presenter::new(false);
    let session = Session::open(mock.clone()).await.expect("mock probe succeeds");

    match app.execute(&session, &cli.command).await {
        Ok(outcome) => (presenter.outcome(&outcome), exit_code::SUCCESS),
        Err(err) => (presenter.error(&err), err.exit_code()),
    }
}

#[tokio::test]
async fn test_market_command_end_to_end() {
    let mock = Arc::new(MockExchange::new().with_status("FILLED").with_first_order_id(12345));

    let (out, code) = run(&["market", "btcusdt", "buy", "0.01"], &mock).await;

    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("12345"));
    assert!(out.contains("BTCUSDT"));
    assert!(out.contains("FILLED"));
}

#[tokio::test]
async fn test_oco_command_end_to_end() {
    let mock = Arc::new(MockExchange::new());

    let (out, code) = run(&["oco", "ETHUSDT", "BUY", "1", "4000", "3500"], &mock).await;

    assert_eq!(code, exit_code::SUCCESS);
    assert!(out.contains("Take-Profit (LIMIT)"));
    assert!(out.contains("Stop-Loss (STOP_MARKET)"));
    assert_eq!(mock.placed_orders().len(), 2);
}

#[tokio::test]
async fn test_oco_stop_loss_rejection_reports_live_order() {
    let mock = Arc::new(MockExchange::new().with_first_order_id(31));
    mock.push_accept();
    mock.push_rejection(-2021, "Order would immediately trigger.");

    let (out, code) = run(&["oco", "ETHUSDT", "SELL", "2", "3000", "3600"], &mock).await;

    assert_eq!(code, exit_code::PARTIAL_OCO);
    assert!(out.contains("API ERROR"));
    assert!(out.contains("WARNING: take-profit order 31"));
    // Probe plus two placements; nothing was cancelled.
    assert_eq!(mock.calls().len(), 3);
    assert!(matches!(mock.calls()[0], MockCall::Probe));
}

#[tokio::test]
async fn test_limit_rejection_is_api_error() {
    let mock = Arc::new(MockExchange::new());
    mock.push_rejection(-4014, "Price not increased by tick size.");

    let (out, code) = run(&["limit", "BTCUSDT", "BUY", "0.01", "65000.123"], &mock).await;

    assert_eq!(code, exit_code::EXCHANGE);
    assert_eq!(out, "API ERROR: APIError(code=-4014): Price not increased by tick size.");
}
