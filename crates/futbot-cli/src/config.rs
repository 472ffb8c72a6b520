//! Configuration management.
//!
//! Resolution order: `--config` argument, `FUTBOT_CONFIG`, then
//! `config/default.toml` when it exists, otherwise built-in defaults.
//! Credentials never live here; only where to find them.
//!
//! The exchange endpoint is pinned to the futures testnet. The only other
//! accepted base URLs are loopback addresses, for local stub servers.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futbot_exchange::{ClientSettings, CredentialSource, API_KEY_VAR, API_SECRET_VAR, TESTNET_BASE_URL};
use futbot_telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use url::{Host, Url};

use crate::error::{AppError, AppResult};

/// Environment variable naming the config file.
pub const CONFIG_ENV_VAR: &str = "FUTBOT_CONFIG";
/// Config file used when nothing else is given.
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Largest recvWindow the exchange accepts.
const MAX_RECV_WINDOW_MS: u64 = 60_000;

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub exchange: ExchangeConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// `[exchange]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Futures testnet, or a loopback stub.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_recv_window_ms")]
    pub recv_window_ms: u64,
    /// Per-request HTTP timeout.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    TESTNET_BASE_URL.to_string()
}

fn default_recv_window_ms() -> u64 {
    5_000
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            recv_window_ms: default_recv_window_ms(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

/// `[credentials]` section: where the key pair comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Merge a dotenv file into the environment first. `false` reads the
    /// process environment only.
    #[serde(default = "default_dotenv")]
    pub dotenv: bool,
    /// Dotenv file to load. `None` looks for `.env` in the working directory.
    #[serde(default)]
    pub env_file: Option<PathBuf>,
    #[serde(default = "default_key_var")]
    pub key_var: String,
    #[serde(default = "default_secret_var")]
    pub secret_var: String,
}

fn default_dotenv() -> bool {
    true
}

fn default_key_var() -> String {
    API_KEY_VAR.to_string()
}

fn default_secret_var() -> String {
    API_SECRET_VAR.to_string()
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            dotenv: default_dotenv(),
            env_file: None,
            key_var: default_key_var(),
            secret_var: default_secret_var(),
        }
    }
}

impl AppConfig {
    /// Resolve and load configuration.
    ///
    /// An explicitly requested file (argument or env var) must exist; the
    /// default path is optional.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let requested = explicit
            .map(Path::to_path_buf)
            .or_else(|| std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from));

        let config = match requested {
            Some(path) => Self::from_file(&path)?,
            None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_PATH))?
            }
            None => {
                tracing::debug!(path = DEFAULT_CONFIG_PATH, "Config file not found, using defaults");
                Self::default()
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from a specific file.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;

        Self::from_toml(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config {}: {e}", path.display())))
    }

    fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Reject endpoints other than the testnet, and values the exchange
    /// would refuse anyway.
    pub fn validate(&self) -> AppResult<()> {
        let raw = &self.exchange.base_url;
        if !self.is_testnet() && !is_loopback(raw) {
            return Err(AppError::Config(format!(
                "exchange.base_url must be {TESTNET_BASE_URL} or a loopback address, got '{raw}'"
            )));
        }
        if self.exchange.recv_window_ms == 0 || self.exchange.recv_window_ms > MAX_RECV_WINDOW_MS {
            return Err(AppError::Config(format!(
                "exchange.recv_window_ms must be in 1..={MAX_RECV_WINDOW_MS}, got {}",
                self.exchange.recv_window_ms
            )));
        }
        if self.exchange.timeout_ms == 0 {
            return Err(AppError::Config("exchange.timeout_ms must be positive".to_string()));
        }
        Ok(())
    }

    /// True when pointed at the futures testnet.
    pub fn is_testnet(&self) -> bool {
        self.exchange.base_url.trim_end_matches('/') == TESTNET_BASE_URL
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.exchange.base_url.clone(),
            recv_window_ms: self.exchange.recv_window_ms,
            timeout: Duration::from_millis(self.exchange.timeout_ms),
        }
    }

    pub fn credential_source(&self) -> CredentialSource {
        let key_var = self.credentials.key_var.clone();
        let secret_var = self.credentials.secret_var.clone();
        if self.credentials.dotenv {
            CredentialSource::DotEnv {
                path: self.credentials.env_file.clone(),
                key_var,
                secret_var,
            }
        } else {
            CredentialSource::EnvVar {
                key_var,
                secret_var,
            }
        }
    }
}

/// `http(s)://` URL whose host is `localhost` or a loopback IP.
fn is_loopback(raw: &str) -> bool {
    let Ok(url) = Url::parse(raw) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host() {
        Some(Host::Domain(domain)) => domain.eq_ignore_ascii_case("localhost"),
        Some(Host::Ipv4(ip)) => ip.is_loopback(),
        Some(Host::Ipv6(ip)) => ip.is_loopback(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(config.is_testnet());
        assert_eq!(config.logging.file, Some(PathBuf::from("bot.log")));
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml(
            r#"
            [exchange]
            timeout_ms = 2500

            [logging]
            level = "debug"
            json = true

            [credentials]
            env_file = "secrets/testnet.env"
            "#,
        )
        .unwrap();

        assert_eq!(config.exchange.base_url, TESTNET_BASE_URL);
        assert_eq!(config.exchange.recv_window_ms, 5_000);
        assert_eq!(config.exchange.timeout_ms, 2_500);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
        assert_eq!(config.credentials.key_var, API_KEY_VAR);
        assert_eq!(
            config.credentials.env_file,
            Some(PathBuf::from("secrets/testnet.env"))
        );
    }

    #[test]
    fn test_client_settings_conversion() {
        let mut config = AppConfig::default();
        config.exchange.base_url = "http://127.0.0.1:9000".to_string();
        config.exchange.timeout_ms = 1_500;

        let settings = config.client_settings();
        assert_eq!(settings.base_url, "http://127.0.0.1:9000");
        assert_eq!(settings.recv_window_ms, 5_000);
        assert_eq!(settings.timeout, Duration::from_millis(1_500));
        assert!(!config.is_testnet());
    }

    #[test]
    fn test_credential_source_uses_configured_names() {
        let mut config = AppConfig::default();
        config.credentials.key_var = "MY_KEY".to_string();

        match config.credential_source() {
            CredentialSource::DotEnv {
                path,
                key_var,
                secret_var,
            } => {
                assert!(path.is_none());
                assert_eq!(key_var, "MY_KEY");
                assert_eq!(secret_var, API_SECRET_VAR);
            }
            other => panic!("unexpected source: {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.exchange.base_url = "testnet.binancefuture.com".to_string();
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.exchange.base_url = "ftp://127.0.0.1".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.exchange.recv_window_ms = 120_000;
        assert!(matches!(config.validate(), Err(AppError::Config(_))));

        let mut config = AppConfig::default();
        config.exchange.timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_production_endpoint_rejected() {
        for url in [
            "https://fapi.binance.com",
            "https://fapi.binance.com/",
            "http://testnet.binancefuture.com.evil.example",
            "https://10.0.0.5:8443",
        ] {
            let config = AppConfig::from_toml(&format!("[exchange]\nbase_url = \"{url}\"")).unwrap();
            let err = config.validate().unwrap_err();
            assert!(matches!(err, AppError::Config(_)), "{url} accepted");
            assert_eq!(err.exit_code(), crate::error::exit_code::CONFIG);
        }
    }

    #[test]
    fn test_testnet_and_loopback_endpoints_accepted() {
        for url in [
            "https://testnet.binancefuture.com",
            "https://testnet.binancefuture.com/",
            "http://127.0.0.1:9000",
            "http://localhost:8080",
            "http://[::1]:9000",
        ] {
            let mut config = AppConfig::default();
            config.exchange.base_url = url.to_string();
            assert!(config.validate().is_ok(), "{url} rejected");
        }
    }

    #[test]
    fn test_dotenv_disabled_reads_environment_only() {
        let config = AppConfig::from_toml("[credentials]\ndotenv = false").unwrap();
        assert!(matches!(
            config.credential_source(),
            CredentialSource::EnvVar { .. }
        ));
    }

    #[test]
    fn test_missing_explicit_file_is_config_error() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/futbot.toml"))).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert_eq!(err.exit_code(), crate::error::exit_code::CONFIG);
    }

    #[test]
    fn test_from_file_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("futbot-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[exchange]\ntimeout_ms = \"soon\"\n").unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
