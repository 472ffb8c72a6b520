//! Session provider.
//!
//! A `Session` exists only after credentials were validated and one
//! authenticated probe succeeded. It is created once per process and never
//! renewed.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::{AccountSnapshot, DynExchangeApi, ExchangeApi};
use crate::client::{BinanceFuturesClient, ClientSettings};
use crate::credentials::Credentials;
use crate::error::{ExchangeError, ExchangeResult};

/// Connected, probed exchange handle.
#[derive(Clone)]
pub struct Session {
    api: DynExchangeApi,
    account: AccountSnapshot,
}

impl Session {
    /// Probe `api` and wrap it in a session.
    ///
    /// # Errors
    /// `ExchangeError::Connection` wrapping the probe failure.
    pub async fn open(api: DynExchangeApi) -> ExchangeResult<Self> {
        match api.probe().await {
            Ok(account) => {
                info!(base_url = %api.base_url(), "Successfully connected to futures testnet");
                Ok(Self { api, account })
            }
            Err(e) => {
                error!(base_url = %api.base_url(), error = %e, "Error connecting to exchange");
                Err(ExchangeError::Connection(Box::new(e)))
            }
        }
    }

    pub fn api(&self) -> &dyn ExchangeApi {
        self.api.as_ref()
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    /// Account state returned by the probe.
    pub fn account(&self) -> &AccountSnapshot {
        &self.account
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url())
            .field("account", &self.account)
            .finish()
    }
}

/// Validate credentials, build the REST client and probe it.
pub async fn connect(credentials: Credentials, settings: ClientSettings) -> ExchangeResult<Session> {
    connect_with(credentials, |creds| {
        let client = BinanceFuturesClient::new(creds, settings)?;
        Ok(Arc::new(client) as DynExchangeApi)
    })
    .await
}

/// Like [`connect`] with a caller-supplied transport.
///
/// `build` only runs once the credentials passed validation, so an empty
/// key or secret never produces any network activity.
pub async fn connect_with<F>(credentials: Credentials, build: F) -> ExchangeResult<Session>
where
    F: FnOnce(Credentials) -> ExchangeResult<DynExchangeApi>,
{
    if let Err(e) = credentials.validate() {
        error!(error = %e, "Invalid credentials");
        return Err(e);
    }
    let api = build(credentials)?;
    Session::open(api).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::mock::MockExchange;

    fn mock_factory(
        mock: Arc<MockExchange>,
    ) -> impl FnOnce(Credentials) -> ExchangeResult<DynExchangeApi> {
        move |_| Ok(mock as DynExchangeApi)
    }

    #[tokio::test]
    async fn test_connect_probes_once() {
        let mock = Arc::new(MockExchange::new());
        let session = connect_with(Credentials::new("key", "secret"), mock_factory(mock.clone()))
            .await
            .unwrap();

        assert_eq!(mock.probe_count(), 1);
        assert!(session.account().can_trade);
        assert_eq!(session.base_url(), MockExchange::BASE_URL);
    }

    #[tokio::test]
    async fn test_empty_key_fails_without_network() {
        let mock = Arc::new(MockExchange::new());
        let err = connect_with(Credentials::new("", "secret"), mock_factory(mock.clone()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_secret_fails_without_network() {
        let mock = Arc::new(MockExchange::new());
        let err = connect_with(Credentials::new("key", ""), mock_factory(mock.clone()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn test_probe_failure_is_connection_error() {
        let mock = Arc::new(MockExchange::new());
        mock.fail_probe(ExchangeError::Api {
            code: -2015,
            msg: "Invalid API-key, IP, or permissions for action.".into(),
        });

        let err = connect_with(Credentials::new("key", "secret"), mock_factory(mock.clone()))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Connection);
        assert_eq!(err.api_code(), Some(-2015));
        assert!(mock.placed_orders().is_empty());
    }

    #[tokio::test]
    async fn test_connect_rejects_empty_credentials_before_building_client() {
        // Points at a port nothing listens on; reaching it would be a bug.
        let settings = ClientSettings {
            base_url: "http://127.0.0.1:1".into(),
            ..Default::default()
        };
        let err = connect(Credentials::new("", ""), settings).await.unwrap_err();
        assert!(matches!(err, ExchangeError::Config(_)));
    }
}
