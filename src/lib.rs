//! Layer1 MCP Bridge: signed digital-asset operations for AI assistants.
//!
//! This library exposes the Layer1 digital-asset API (address creation,
//! transaction listing, balance query, transaction-send) as MCP tools,
//! authenticating every outbound call with RFC 9421 HTTP Message
//! Signatures instead of static bearer tokens.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  AI assistant   │  MCP-compatible agent
//! └────────┬────────┘
//!          │ tool calls
//! ┌────────▼────────────────────────────────────────┐
//! │        Layer1 MCP Bridge (this crate)           │
//! │  ┌──────────────┐      ┌──────────────────┐     │
//! │  │  MCP tools   │──────│  RequestSigner   │     │
//! │  │  (addresses, │      │  (RFC 9421 +     │     │
//! │  │   transfers) │      │   RSA-SHA256)    │     │
//! │  └──────────────┘      └──────────────────┘     │
//! └────────┬────────────────────────────────────────┘
//!          │ HTTPS + signature headers
//! ┌────────▼────────┐
//! │  Layer1 API     │  digital-asset custody platform
//! └─────────────────┘
//! ```
//!
//! The risk surface is the signature contract: a canonical, byte-exact
//! signature base built from the request method, target URI, and (for
//! requests with a body) a SHA-256 content digest, signed with
//! RSASSA-PKCS1-v1_5. The remote verifier reconstructs the identical
//! base from the request it receives, so any drift in ordering, quoting,
//! or whitespace rejects every request. See [`signing`] for the exact
//! format.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use layer1_mcp_bridge::{
//!     client::ApiClient,
//!     config::BridgeConfig,
//!     mcp::{CreateAddressParams, Network, create_address},
//! };
//!
//! # async fn example() -> layer1_mcp_bridge::error::Result<()> {
//! // Credentials come from LAYER1_CLIENT_ID, LAYER1_PRIVATE_KEY, and
//! // LAYER1_ASSET_POOL_ID; none of the three has a default.
//! let config = BridgeConfig::from_env()?;
//! let client = ApiClient::new(&config)?;
//!
//! let params = CreateAddressParams {
//!     network: Network::Ethereum,
//!     reference: "order-42".to_string(),
//! };
//! let result = create_address(&client, params).await?;
//! println!("{}", result.text);
//! # Ok(())
//! # }
//! ```
//!
//! # Module organization
//!
//! - [`signing`]: RFC 9421 signature generation (key handling, signature
//!   base, headers)
//! - [`client`]: authenticated HTTP client wrapping the signer
//! - [`mcp`]: tool parameters, validation, and the four operations
//! - [`config`]: environment-backed process configuration
//! - [`error`]: error taxonomy
//!
//! # Security considerations
//!
//! - The private key is parsed once at startup, held immutably for the
//!   process lifetime, and never logged.
//! - Signatures embed a fresh per-call timestamp and are never cached or
//!   reused, including across retries of the same logical request.
//! - The signed URL and body are byte-identical to what is dispatched.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod mcp;
pub mod signing;

pub use client::ApiClient;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use signing::RequestSigner;
