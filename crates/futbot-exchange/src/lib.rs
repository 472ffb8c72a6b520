//! Exchange boundary for futbot.
//!
//! Everything that touches the exchange lives here:
//! - `Credentials`: API key/secret loading (environment, `.env`)
//! - `signer`: HMAC-SHA256 request signing
//! - `ExchangeApi`: the narrow capability the order layer depends on
//! - `BinanceFuturesClient`: REST implementation against the futures testnet
//! - `MockExchange`: in-memory stub for tests
//! - `Session`: one probed, authenticated handle per process

pub mod api;
pub mod client;
pub mod credentials;
pub mod error;
pub mod mock;
pub mod session;
pub mod signer;
pub mod wire;

pub use api::{AccountSnapshot, BoxFuture, DynExchangeApi, ExchangeApi};
pub use client::{BinanceFuturesClient, ClientSettings, TESTNET_BASE_URL};
pub use credentials::{CredentialSource, Credentials, API_KEY_VAR, API_SECRET_VAR};
pub use error::{ErrorKind, ExchangeError, ExchangeResult};
pub use mock::{MockCall, MockExchange};
pub use session::{connect, connect_with, Session};
