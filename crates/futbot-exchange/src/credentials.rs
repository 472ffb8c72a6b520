//! API credential loading.
//!
//! Security notes:
//! - The secret is held in a `Zeroizing` buffer and wiped on drop.
//! - `Debug` never prints the secret, and only a prefix of the key.
//! - Credentials are loaded once per process; there is no rotation.

use std::fmt;
use std::path::PathBuf;

use tracing::debug;
use zeroize::Zeroizing;

use crate::error::{ExchangeError, ExchangeResult};

/// Default environment variable holding the API key.
pub const API_KEY_VAR: &str = "BINANCE_API_KEY";
/// Default environment variable holding the API secret.
pub const API_SECRET_VAR: &str = "BINANCE_API_SECRET";

const MISSING_MSG: &str = "API key and secret must be set in the .env file.";

/// Where to read the credential pair from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Process environment only.
    EnvVar { key_var: String, secret_var: String },
    /// A dotenv file merged into the environment first. Variables already
    /// set in the environment win over the file.
    DotEnv {
        path: Option<PathBuf>,
        key_var: String,
        secret_var: String,
    },
}

impl Default for CredentialSource {
    fn default() -> Self {
        Self::DotEnv {
            path: None,
            key_var: API_KEY_VAR.to_string(),
            secret_var: API_SECRET_VAR.to_string(),
        }
    }
}

/// API key and secret pair.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    api_secret: Zeroizing<String>,
}

impl Credentials {
    /// Wrap a raw pair. No validation happens here; see [`Credentials::validate`].
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into().trim().to_string(),
            api_secret: Zeroizing::new(api_secret.into().trim().to_string()),
        }
    }

    /// Load from the given source.
    ///
    /// # Errors
    /// `ExchangeError::Config` if the dotenv file cannot be read or either
    /// variable is unset or empty.
    pub fn load(source: &CredentialSource) -> ExchangeResult<Self> {
        let (key_var, secret_var) = match source {
            CredentialSource::EnvVar {
                key_var,
                secret_var,
            } => (key_var, secret_var),
            CredentialSource::DotEnv {
                path,
                key_var,
                secret_var,
            } => {
                match path {
                    Some(path) => {
                        dotenvy::from_path(path).map_err(|e| {
                            ExchangeError::Config(format!(
                                "Failed to read {}: {e}",
                                path.display()
                            ))
                        })?;
                    }
                    None => {
                        // A missing .env in the working directory is fine.
                        if let Ok(found) = dotenvy::dotenv() {
                            debug!(path = %found.display(), "Loaded .env");
                        }
                    }
                }
                (key_var, secret_var)
            }
        };

        let api_key = std::env::var(key_var).unwrap_or_default();
        let api_secret = std::env::var(secret_var).unwrap_or_default();
        let credentials = Self::new(api_key, api_secret);
        credentials.validate()?;
        Ok(credentials)
    }

    /// Both halves must be non-empty.
    pub fn validate(&self) -> ExchangeResult<()> {
        if self.api_key.is_empty() || self.api_secret.is_empty() {
            return Err(ExchangeError::Config(MISSING_MSG.to_string()));
        }
        Ok(())
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.api_key.chars().take(4).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{shown}***"))
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_empty_halves() {
        assert!(matches!(
            Credentials::new("", "secret").validate(),
            Err(ExchangeError::Config(_))
        ));
        assert!(matches!(
            Credentials::new("key", "   ").validate(),
            Err(ExchangeError::Config(_))
        ));
        assert!(Credentials::new("key", "secret").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let creds = Credentials::new("abcdefgh", "topsecret");
        let shown = format!("{creds:?}");
        assert!(shown.contains("abcd***"));
        assert!(!shown.contains("efgh"));
        assert!(!shown.contains("topsecret"));
    }

    #[test]
    fn test_load_from_env_vars() {
        std::env::set_var("FUTBOT_TEST_KEY_OK", "k1");
        std::env::set_var("FUTBOT_TEST_SECRET_OK", "s1");
        let source = CredentialSource::EnvVar {
            key_var: "FUTBOT_TEST_KEY_OK".into(),
            secret_var: "FUTBOT_TEST_SECRET_OK".into(),
        };
        let creds = Credentials::load(&source).unwrap();
        assert_eq!(creds.api_key(), "k1");
        assert_eq!(creds.api_secret(), "s1");
    }

    #[test]
    fn test_load_missing_var_is_config_error() {
        let source = CredentialSource::EnvVar {
            key_var: "FUTBOT_TEST_KEY_UNSET".into(),
            secret_var: "FUTBOT_TEST_SECRET_UNSET".into(),
        };
        let err = Credentials::load(&source).unwrap_err();
        assert!(matches!(err, ExchangeError::Config(_)));
        assert_eq!(err.to_string(), MISSING_MSG);
    }

    #[test]
    fn test_load_missing_dotenv_file_is_config_error() {
        let source = CredentialSource::DotEnv {
            path: Some(PathBuf::from("/nonexistent/futbot/.env")),
            key_var: API_KEY_VAR.into(),
            secret_var: API_SECRET_VAR.into(),
        };
        assert!(matches!(
            Credentials::load(&source),
            Err(ExchangeError::Config(_))
        ));
    }
}
