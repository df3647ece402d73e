//! Parameter and result types for the MCP tools.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BridgeError, Result};

/// Blockchain network an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Network {
    /// Ethereum mainnet (or the sandbox equivalent).
    Ethereum,
    /// Bitcoin.
    Bitcoin,
    /// Polygon PoS.
    Polygon,
    /// Tron.
    Tron,
    /// Solana.
    Solana,
}

impl Network {
    /// Wire representation of the network.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ethereum => "ETHEREUM",
            Self::Bitcoin => "BITCOIN",
            Self::Polygon => "POLYGON",
            Self::Tron => "TRON",
            Self::Solana => "SOLANA",
        }
    }
}

/// Digital asset a transaction moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Asset {
    /// Ether.
    Eth,
    /// Bitcoin.
    Btc,
    /// USD Coin.
    Usdc,
    /// Tether.
    Usdt,
}

impl Asset {
    /// Wire representation of the asset.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Eth => "ETH",
            Self::Btc => "BTC",
            Self::Usdc => "USDC",
            Self::Usdt => "USDT",
        }
    }
}

/// Parameters for the create-address tool.
#[derive(Debug, Deserialize)]
pub struct CreateAddressParams {
    /// Network the address lives on.
    pub network: Network,
    /// Caller-chosen reference attached to the address.
    pub reference: String,
}

/// Parameters for the list-transactions tool.
#[derive(Debug, Default, Deserialize)]
pub struct ListTransactionsParams {
    /// Optional transaction-hash filter.
    ///
    /// When present, the listing is narrowed with a `q=hash:<value>`
    /// query parameter; when absent, all transactions in the asset pool
    /// are listed.
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

/// Parameters for the send-transaction-request tool.
#[derive(Debug, Deserialize)]
pub struct SendTransactionParams {
    /// Destination address on the target network.
    pub destination_address: String,
    /// Amount as a decimal string (e.g. `"0.05"`), never a float.
    pub amount: String,
    /// Asset to transfer.
    pub asset: Asset,
    /// Network to transfer on.
    pub network: Network,
    /// Caller-chosen reference attached to the transaction request.
    pub reference: String,
}

/// Tool output: the remote API's JSON response, wrapped as text.
#[derive(Debug, Clone, Serialize)]
pub struct ToolResult {
    /// Pretty-printed JSON response body.
    pub text: String,
}

impl ToolResult {
    /// Wraps a JSON response as a text result.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Validation`] if the value cannot be
    /// serialized (not reachable for values parsed from JSON).
    pub fn from_json(value: &Value) -> Result<Self> {
        let text = serde_json::to_string_pretty(value)
            .map_err(|e| BridgeError::Validation(format!("response serialization failed: {e}")))?;
        Ok(Self { text })
    }
}
