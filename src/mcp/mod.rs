//! Tool-calling integration.
//!
//! Exposes the four digital-asset operations to an MCP-compatible AI
//! assistant. Tool registration and protocol plumbing live in the host;
//! this module provides the typed parameters, validation, and the 1:1
//! mapping onto signed API calls.
//!
//! # Available tools
//!
//! - [`tools::create_address`]: create a deposit address in the asset pool
//! - [`tools::list_transactions`]: list transactions, optionally filtered
//!   by hash
//! - [`tools::get_asset_pool_balance`]: fetch the configured asset pool
//! - [`tools::send_transaction_request`]: submit an outbound transfer
//!
//! # Architecture
//!
//! ```text
//! AI assistant
//!     │ tool call (JSON parameters)
//!     ▼
//! MCP tools (this module)
//!     │ validated, typed request
//!     ▼
//! ApiClient (client module)
//!     │ RFC 9421 signed HTTPS
//!     ▼
//! Layer1 digital-asset API
//! ```

pub mod models;
pub mod tools;

pub use models::{
    Asset, CreateAddressParams, ListTransactionsParams, Network, SendTransactionParams,
    ToolResult,
};
pub use tools::{create_address, get_asset_pool_balance, list_transactions, send_transaction_request};
