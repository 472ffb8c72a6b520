//! HTTP client for the USDT-M futures REST API.
//!
//! Signs every request with the account's API secret and sends it to a
//! single base URL (the testnet by default). One call in, one response
//! out: no retries, no rate limiting.

use std::time::Duration;

use futbot_core::{OrderRequest, OrderResult};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::api::{AccountSnapshot, BoxFuture, ExchangeApi};
use crate::credentials::Credentials;
use crate::error::{ExchangeError, ExchangeResult};
use crate::signer::{self, QueryParams, DEFAULT_RECV_WINDOW_MS};
use crate::wire::{self, ACCOUNT_PATH, API_KEY_HEADER, ORDER_PATH};

/// Futures testnet REST endpoint.
pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";

/// Default timeout for API requests.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Transport settings for [`BinanceFuturesClient`].
#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub base_url: String,
    pub recv_window_ms: u64,
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Signed REST client for the futures API.
pub struct BinanceFuturesClient {
    /// HTTP client.
    client: Client,
    credentials: Credentials,
    base_url: String,
    recv_window_ms: u64,
}

impl BinanceFuturesClient {
    /// Create a new client.
    ///
    /// # Arguments
    /// * `credentials` - API key/secret pair used for every request
    /// * `settings` - base URL, recvWindow and timeout
    pub fn new(credentials: Credentials, settings: ClientSettings) -> ExchangeResult<Self> {
        let client = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|e| ExchangeError::Transport(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            credentials,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            recv_window_ms: settings.recv_window_ms,
        })
    }

    /// Send a signed request and decode a 2xx body as `T`.
    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        params: &QueryParams,
    ) -> ExchangeResult<T> {
        let query = signer::signed_query(
            self.credentials.api_secret(),
            params,
            signer::now_ms(),
            self.recv_window_ms,
        );
        let url = format!("{}{path}?{query}", self.base_url);

        debug!(%method, path, "Sending signed request");

        let response = self
            .client
            .request(method, &url)
            .header(API_KEY_HEADER, self.credentials.api_key())
            .send()
            .await
            .map_err(|e| {
                ExchangeError::Transport(format!("HTTP request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| {
                ExchangeError::Transport(format!("Failed to read response: {}", e.without_url()))
            })?;

        if !status.is_success() {
            let err = wire::error_from_response(status.as_u16(), &body);
            warn!(path, status = status.as_u16(), error = %err, "Request rejected");
            return Err(err);
        }

        serde_json::from_str(&body).map_err(|e| ExchangeError::Decode(format!("{e}: {body}")))
    }
}

impl ExchangeApi for BinanceFuturesClient {
    fn probe(&self) -> BoxFuture<'_, ExchangeResult<AccountSnapshot>> {
        Box::pin(async move {
            info!(url = %self.base_url, "Checking account access");
            let account: AccountSnapshot = self
                .send_signed(Method::GET, ACCOUNT_PATH, &QueryParams::new())
                .await?;
            info!(can_trade = account.can_trade, "Account access confirmed");
            Ok(account)
        })
    }

    fn place_order<'a>(&'a self, order: &'a OrderRequest) -> BoxFuture<'a, ExchangeResult<OrderResult>> {
        Box::pin(async move {
            let params = wire::order_params(order);
            self.send_signed(Method::POST, ORDER_PATH, &params).await
        })
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
