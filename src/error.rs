//! Error types for the Layer1 MCP bridge.
//!
//! All fallible operations in this crate return [`Result`], with
//! [`BridgeError`] covering the full failure taxonomy: key material,
//! signing, remote API rejections, transport failures, tool-parameter
//! validation, and process configuration.

use thiserror::Error;

/// Result type alias for bridge operations.
pub type Result<T> = std::result::Result<T, BridgeError>;

/// Errors that can occur in the Layer1 MCP bridge.
///
/// Validation and configuration errors are raised before any network call
/// is attempted. No error is retried by this crate; callers see every
/// failure with enough detail (status code, response body, or underlying
/// cause) to diagnose it.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The configured private key is not usable.
    ///
    /// The key text must contain a base64 PKCS#8 payload (with or without
    /// PEM header/footer lines) that parses as an RSA private key.
    #[error("invalid signing key material: {0}")]
    KeyFormat(String),

    /// Cryptographic signature generation failed.
    ///
    /// A request with a malformed or missing signature would be rejected
    /// remotely, so this error always propagates and the request is never
    /// sent.
    #[error("signature generation failed: {0}")]
    Signing(String),

    /// The remote API rejected the request with a non-2xx status.
    #[error("API request failed with status {status}: {body}")]
    Api {
        /// HTTP status code returned by the remote API.
        status: u16,
        /// Raw response body, surfaced verbatim.
        body: String,
    },

    /// No usable response was received (DNS, TLS, timeout, reset).
    #[error("network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// A tool parameter is missing or invalid.
    #[error("invalid tool parameter: {0}")]
    Validation(String),

    /// Process configuration is missing or invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}
