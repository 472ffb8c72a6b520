//! Request signing for USER_DATA / TRADE endpoints.
//!
//! The exchange authenticates a request by an HMAC-SHA256 of its exact
//! query string, keyed with the API secret and sent hex-encoded as the
//! final `signature` parameter. Any reordering or re-encoding between
//! signing and sending invalidates the signature, so the signed string is
//! what goes on the wire.

use ring::hmac;
use url::form_urlencoded;

/// Default `recvWindow` (ms) accepted by the exchange for a signed request.
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5_000;

/// Ordered query parameters.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: &'static str, value: impl Into<String>) -> &mut Self {
        self.pairs.push((key, value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(k, _)| *k)
    }

    /// `application/x-www-form-urlencoded` encoding, in insertion order.
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &self.pairs {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

/// Hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn sign(secret: &str, payload: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let tag = hmac::sign(&key, payload.as_bytes());
    hex::encode(tag.as_ref())
}

/// Append `timestamp` and `recvWindow`, sign, and return the full query string.
pub fn signed_query(secret: &str, params: &QueryParams, timestamp_ms: i64, recv_window_ms: u64) -> String {
    let mut params = params.clone();
    params
        .push("recvWindow", recv_window_ms.to_string())
        .push("timestamp", timestamp_ms.to_string());
    let query = params.encode();
    let signature = sign(secret, &query);
    format!("{query}&signature={signature}")
}

/// Current wall-clock time in milliseconds, as the exchange expects.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
