//! RFC 9421 request signing.
//!
//! Implements the client side of the HTTP Message Signature contract used
//! by the Layer1 API: key normalization and loading ([`key`]), and
//! signature-base construction plus header generation ([`signer`]).
//!
//! # Signature shape
//!
//! Each signed request carries:
//!
//! - `Content-Digest: sha-256=:<base64>:` (only when a body is present)
//! - `Signature-Input: sig=("@method" "@target-uri" ["content-digest"]);created=<secs>;keyid="<id>";alg="rsa-v1_5-sha256"`
//! - `Signature: sig=:<base64>:`
//!
//! The covered components are fixed and ordered; `content-digest` joins
//! the list if and only if the request carries a body. The signed URL and
//! body must be byte-identical to what is actually dispatched or the
//! remote verifier rejects the request.

pub mod key;
pub mod signer;

pub use key::normalize_private_key_pem;
pub use signer::{CoveredComponent, RequestSigner, SignatureHeaders, SIGNATURE_ALGORITHM};
