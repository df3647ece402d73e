//! Process configuration for the bridge.
//!
//! All credentials arrive through the environment at process start:
//! the client identifier (`keyid`), the RSA private key, and the default
//! asset pool id. None of the three has a default. The API base URL may
//! be overridden for non-sandbox deployments.

use url::Url;

use crate::error::{BridgeError, Result};

/// Default API base URL (sandbox environment).
pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.layer1.com";

/// Environment variable holding the client identifier.
pub const ENV_CLIENT_ID: &str = "LAYER1_CLIENT_ID";
/// Environment variable holding the PKCS#8 PEM private key.
pub const ENV_PRIVATE_KEY: &str = "LAYER1_PRIVATE_KEY";
/// Environment variable holding the default asset pool id.
pub const ENV_ASSET_POOL_ID: &str = "LAYER1_ASSET_POOL_ID";
/// Environment variable overriding the API base URL.
pub const ENV_BASE_URL: &str = "LAYER1_BASE_URL";

/// Bridge configuration, read once at process start.
#[derive(Clone)]
pub struct BridgeConfig {
    /// Base URL of the Layer1 API.
    pub base_url: String,
    /// Client identifier bound to the signing key (`keyid`).
    pub client_id: String,
    /// RSA private key in PKCS#8 PEM form. Never logged.
    pub private_key_pem: String,
    /// Default asset pool id used by every tool.
    pub asset_pool_id: String,
}

// Keeps key material out of debug output.
impl std::fmt::Debug for BridgeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeConfig")
            .field("base_url", &self.base_url)
            .field("client_id", &self.client_id)
            .field("private_key_pem", &"<redacted>")
            .field("asset_pool_id", &self.asset_pool_id)
            .finish()
    }
}

impl BridgeConfig {
    /// Loads configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if any required variable is missing
    /// or empty, or if the base URL is invalid.
    pub fn from_env() -> Result<Self> {
        let config = Self {
            base_url: std::env::var(ENV_BASE_URL).unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned()),
            client_id: require_env(ENV_CLIENT_ID)?,
            private_key_pem: require_env(ENV_PRIVATE_KEY)?,
            asset_pool_id: require_env(ENV_ASSET_POOL_ID)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Config`] if the base URL does not parse or
    /// does not use HTTPS.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            BridgeError::Config(format!("invalid base URL '{}': {e}", self.base_url))
        })?;

        if url.scheme() != "https" {
            return Err(BridgeError::Config(format!(
                "base URL must use HTTPS, got: {}",
                url.scheme()
            )));
        }

        if self.client_id.is_empty() {
            return Err(BridgeError::Config("client id cannot be empty".to_owned()));
        }
        if self.asset_pool_id.is_empty() {
            return Err(BridgeError::Config("asset pool id cannot be empty".to_owned()));
        }

        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(BridgeError::Config(format!("missing required environment variable {name}"))),
    }
}
