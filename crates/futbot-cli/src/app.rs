//! Application wiring: credentials, session, one command.

use std::sync::Arc;

use futbot_core::{ClientOrderId, OcoRequest, OcoResult, OrderRequest, OrderResult, OrderType};
use futbot_exchange::{connect, Credentials, Session};
use futbot_executor::{place_oco, submit, Reporter, TracingReporter};
use tracing::{info, warn};

use crate::cli::Command;
use crate::config::AppConfig;
use crate::error::AppResult;

/// What a successful command produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Market(OrderResult),
    Limit(OrderResult),
    Oco(OcoResult),
}

/// Main application.
pub struct Application {
    config: AppConfig,
    reporter: Arc<dyn Reporter>,
}

impl Application {
    /// Create an application that reports order events to the log.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            reporter: Arc::new(TracingReporter),
        }
    }

    /// Replace the order event reporter.
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Read the API key pair from the configured source.
    pub fn load_credentials(&self) -> AppResult<Credentials> {
        Ok(Credentials::load(&self.config.credential_source())?)
    }

    /// Open the one session this process uses.
    ///
    /// The endpoint is re-checked here so a config built in code cannot
    /// reach anything but the testnet or a loopback stub.
    pub async fn connect(&self, credentials: Credentials) -> AppResult<Session> {
        self.config.validate()?;
        if !self.config.is_testnet() {
            warn!(base_url = %self.config.exchange.base_url, "Using a local endpoint instead of the futures testnet");
        }
        let session = connect(credentials, self.config.client_settings()).await?;
        info!(
            can_trade = session.account().can_trade,
            available_balance = ?session.account().available_balance,
            "Session opened"
        );
        Ok(session)
    }

    /// Run `command` against an open session.
    pub async fn execute(&self, session: &Session, command: &Command) -> AppResult<Outcome> {
        let reporter = self.reporter.as_ref();
        match command {
            Command::Market(args) => {
                let order = OrderRequest::builder(args.symbol.clone(), args.side, OrderType::Market)
                    .quantity(args.quantity)
                    .client_order_id(ClientOrderId::new())
                    .build()?;
                let result = submit(session, &order, reporter).await?;
                Ok(Outcome::Market(result))
            }
            Command::Limit(args) => {
                let mut order = OrderRequest::limit(args.symbol.clone(), args.side, args.quantity, args.price)?;
                order.client_order_id = Some(ClientOrderId::new());
                let result = submit(session, &order, reporter).await?;
                Ok(Outcome::Limit(result))
            }
            Command::Oco(args) => {
                let request = OcoRequest::new(
                    args.symbol.clone(),
                    args.side,
                    args.quantity,
                    args.take_profit_price,
                    args.stop_loss_price,
                )?;
                let result = place_oco(session, &request, reporter).await?;
                Ok(Outcome::Oco(result))
            }
        }
    }
}
