//! RFC 9421 HTTP Message Signature generation.
//!
//! Every outbound API call is authenticated with three structured headers
//! derived from a canonical signature base:
//!
//! - `Content-Digest`: SHA-256 envelope over the request body (only when a
//!   body is present)
//! - `Signature-Input`: the covered components and signature parameters
//! - `Signature`: base64 RSASSA-PKCS1-v1_5/SHA-256 signature over the base
//!
//! The signature base is byte-exact by contract: the remote verifier
//! rebuilds the identical string from the request it received, so any
//! deviation in ordering, quoting, or whitespace fails authentication for
//! every request.

use std::{
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use rsa::RsaPrivateKey;
use sha2::{Digest, Sha256};
use signature::{SignatureEncoding, Signer};
use tracing::instrument;

use crate::{
    error::{BridgeError, Result},
    signing::key,
};

/// Signature algorithm tag carried in the signature parameters.
pub const SIGNATURE_ALGORITHM: &str = "rsa-v1_5-sha256";

/// A request component covered by the signature.
///
/// Components are ordered: method, target URI, then content digest if and
/// only if the request carries a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoveredComponent {
    /// The HTTP method, uppercased (`"@method"`).
    Method,
    /// The absolute request URL, verbatim (`"@target-uri"`).
    TargetUri,
    /// The `Content-Digest` header value (`"content-digest"`).
    ContentDigest,
}

impl CoveredComponent {
    /// Returns the lowercase component label used in the signature base.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Method => "@method",
            Self::TargetUri => "@target-uri",
            Self::ContentDigest => "content-digest",
        }
    }
}

/// Signature headers for one authenticated request.
#[derive(Debug, Clone)]
pub struct SignatureHeaders {
    /// `Content-Digest` header value; `None` when the request has no body.
    pub content_digest: Option<String>,
    /// `Signature-Input` header value.
    pub signature_input: String,
    /// `Signature` header value.
    pub signature: String,
}

/// Generates RFC 9421 signature headers for outbound API requests.
///
/// The signer holds only the immutable key pair identity (RSA private key
/// plus the `keyid` bound to it) and is safe to share across concurrent
/// requests: every call computes its own timestamp, digest, and signature
/// in locally scoped values, and nothing is cached between calls.
pub struct RequestSigner {
    signing_key: rsa::pkcs1v15::SigningKey<Sha256>,
    key_id: String,
}

// Manual Debug so key material can never leak through logging.
impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").field("key_id", &self.key_id).finish_non_exhaustive()
    }
}

impl RequestSigner {
    /// Creates a signer from PKCS#8 PEM key text and its client identifier.
    ///
    /// The key text is normalized first (header/footer markers and
    /// embedded whitespace are tolerated) and parsed eagerly, so a
    /// malformed key fails here rather than on the first request.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::KeyFormat`] if the key text does not contain
    /// a usable RSA private key.
    pub fn new(private_key_pem: &str, key_id: &str) -> Result<Self> {
        let private_key = key::load_rsa_private_key(private_key_pem)?;
        Ok(Self::from_private_key(private_key, key_id))
    }

    /// Creates a signer from an already-parsed RSA private key.
    #[must_use]
    pub fn from_private_key(private_key: RsaPrivateKey, key_id: &str) -> Self {
        Self {
            signing_key: rsa::pkcs1v15::SigningKey::new(private_key),
            key_id: key_id.to_owned(),
        }
    }

    /// Returns the `keyid` embedded in every signature.
    #[must_use]
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Builds the signature headers for one request.
    ///
    /// `url` must be the absolute URL actually dispatched (query string
    /// included) and `payload` the exact serialized body text; an empty
    /// payload omits the content digest from the covered components
    /// entirely. The timestamp is captured at call time with second
    /// resolution, so retries of the same logical request still produce
    /// fresh signatures.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Signing`] if the clock or the signing
    /// operation fails. This always propagates; a request is never sent
    /// without a valid signature.
    #[instrument(skip(self, payload), fields(method, url, payload_len = payload.len()))]
    pub fn build_headers(&self, url: &str, payload: &str, method: &str) -> Result<SignatureHeaders> {
        let created = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| BridgeError::Signing(format!("system time error: {e}")))?
            .as_secs();

        self.build_headers_at(url, payload, method, created)
    }

    /// Builds signature headers with an explicit `created` timestamp.
    pub(crate) fn build_headers_at(
        &self,
        url: &str,
        payload: &str,
        method: &str,
        created: u64,
    ) -> Result<SignatureHeaders> {
        let content_digest = (!payload.is_empty()).then(|| Self::compute_content_digest(payload));
        let components = covered_components(content_digest.is_some());
        let params = build_signature_params(&components, created, &self.key_id);
        let base = build_signature_base(method, url, content_digest.as_deref(), &params);

        let signature = self
            .signing_key
            .try_sign(base.as_bytes())
            .map_err(|e| BridgeError::Signing(e.to_string()))?;
        let signature_b64 = BASE64.encode(signature.to_bytes());

        Ok(SignatureHeaders {
            content_digest,
            signature_input: format!("sig={params}"),
            signature: format!("sig=:{signature_b64}:"),
        })
    }

    /// Computes the `Content-Digest` header value per RFC 9530.
    ///
    /// SHA-256 over the exact UTF-8 bytes of the payload, base64-encoded
    /// and wrapped in the `sha-256=:...:` envelope.
    #[must_use]
    pub fn compute_content_digest(payload: &str) -> String {
        let hash = Sha256::digest(payload.as_bytes());
        format!("sha-256=:{}:", BASE64.encode(hash))
    }
}

/// Returns the ordered covered-components list for a request.
pub(crate) fn covered_components(has_body: bool) -> Vec<CoveredComponent> {
    let mut components = vec![CoveredComponent::Method, CoveredComponent::TargetUri];
    if has_body {
        components.push(CoveredComponent::ContentDigest);
    }
    components
}

/// Formats the signature parameters string.
///
/// Shape: `("@method" "@target-uri" ...);created=<secs>;keyid="<id>";alg="rsa-v1_5-sha256"`
pub(crate) fn build_signature_params(
    components: &[CoveredComponent],
    created: u64,
    key_id: &str,
) -> String {
    let labels = components
        .iter()
        .map(|c| format!("\"{}\"", c.label()))
        .collect::<Vec<_>>()
        .join(" ");

    format!("({labels});created={created};keyid=\"{key_id}\";alg=\"{SIGNATURE_ALGORITHM}\"")
}

/// Builds the canonical signature base string.
///
/// One `"<label>": <value>` line per covered component, followed by the
/// `"@signature-params"` line, joined with `\n` and no trailing newline.
/// A single space follows each colon; nothing else.
pub(crate) fn build_signature_base(
    method: &str,
    url: &str,
    content_digest: Option<&str>,
    params: &str,
) -> String {
    let mut lines = vec![
        format!("\"@method\": {}", method.to_uppercase()),
        format!("\"@target-uri\": {url}"),
    ];
    if let Some(digest) = content_digest {
        lines.push(format!("\"content-digest\": {digest}"));
    }
    lines.push(format!("\"@signature-params\": {params}"));

    lines.join("\n")
}
