//! Authenticated HTTP client for the Layer1 API.
//!
//! [`ApiClient`] assembles each outbound request, obtains signature
//! headers from [`RequestSigner`], performs the HTTP call over a pooled
//! [`reqwest::Client`], and normalizes the outcome: parsed JSON on
//! success, [`BridgeError::Api`] on a non-2xx status, and
//! [`BridgeError::Network`] when no response was received.

use std::time::Duration;

use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use serde_json::Value;
use tracing::{debug, instrument};
use url::Url;

use crate::{
    config::BridgeConfig,
    error::{BridgeError, Result},
    signing::RequestSigner,
};

/// Total request timeout, covering connect, TLS, and response read.
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Connection establishment timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// HTTP client that signs every request per RFC 9421.
///
/// Immutable after construction and safe to share across concurrent
/// requests; each call computes its own timestamp, digest, and signature.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    signer: RequestSigner,
    asset_pool_id: String,
}

impl ApiClient {
    /// Creates a client from configuration.
    ///
    /// The private key is parsed here, so malformed key material fails at
    /// startup rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::KeyFormat`] for unusable key material,
    /// [`BridgeError::Config`] for an unparseable base URL, and
    /// [`BridgeError::Network`] if the HTTP client cannot be built.
    pub fn new(config: &BridgeConfig) -> Result<Self> {
        let signer = RequestSigner::new(&config.private_key_pem, &config.client_id)?;

        let base_url = Url::parse(&config.base_url).map_err(|e| {
            BridgeError::Config(format!("invalid base URL '{}': {e}", config.base_url))
        })?;

        let http = Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(BridgeError::Network)?;

        Ok(Self { http, base_url, signer, asset_pool_id: config.asset_pool_id.clone() })
    }

    /// Returns the configured default asset pool id.
    #[must_use]
    pub fn asset_pool_id(&self) -> &str {
        &self.asset_pool_id
    }

    /// Executes one signed request and returns the parsed JSON response.
    ///
    /// `endpoint` is resolved against the base URL; `query` entries with a
    /// `None` value are skipped silently. The signed URL (query string
    /// included) and the signed body text are exactly what is dispatched.
    ///
    /// # Errors
    ///
    /// - [`BridgeError::Signing`] if signature generation fails (the
    ///   request is not sent)
    /// - [`BridgeError::Api`] for any non-2xx response, carrying the
    ///   status code and raw body
    /// - [`BridgeError::Network`] when no response was received
    #[instrument(skip(self, body), fields(method = %method, endpoint))]
    pub async fn request(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&Value>,
        query: &[(&str, Option<String>)],
    ) -> Result<Value> {
        let url = self.build_url(endpoint, query)?;

        // An absent body signs as an empty payload, never as "null".
        let payload = match body {
            Some(value) => serde_json::to_string(value)
                .map_err(|e| BridgeError::Validation(format!("body serialization failed: {e}")))?,
            None => String::new(),
        };

        let signature = self.signer.build_headers(url.as_str(), &payload, method.as_str())?;

        let mut request = self
            .http
            .request(method, url.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header("Signature-Input", signature.signature_input.as_str())
            .header("Signature", signature.signature.as_str());

        if let Some(digest) = &signature.content_digest {
            request = request.header("Content-Digest", digest.as_str());
        }
        if body.is_some() {
            // The transmitted bytes are the signed payload, verbatim.
            request = request.body(payload);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        debug!(status = status.as_u16(), "API response received");

        if !status.is_success() {
            return Err(BridgeError::Api { status: status.as_u16(), body: text });
        }

        // A 2xx body that is not JSON still surfaces verbatim.
        serde_json::from_str(&text)
            .map_err(|_| BridgeError::Api { status: status.as_u16(), body: text })
    }

    /// Resolves an endpoint and query parameters to the absolute URL.
    pub(crate) fn build_url(&self, endpoint: &str, query: &[(&str, Option<String>)]) -> Result<Url> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| BridgeError::Validation(format!("invalid endpoint '{endpoint}': {e}")))?;

        // query_pairs_mut leaves a dangling '?' when nothing is appended,
        // so only touch the query when at least one value is present.
        if query.iter().any(|(_, value)| value.is_some()) {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                if let Some(value) = value {
                    pairs.append_pair(key, value);
                }
            }
        }

        Ok(url)
    }
}
