//! MCP tool operations over the Layer1 digital-asset API.
//!
//! Each tool validates its parameters, maps 1:1 to one signed
//! [`ApiClient`] call, and returns the remote JSON response wrapped as
//! text. Validation failures surface before any network call is
//! attempted; remote rejections and transport failures propagate
//! unchanged from the client.

use reqwest::Method;
use rust_decimal::Decimal;
use serde_json::json;
use tracing::{info, instrument};

use crate::{
    client::ApiClient,
    error::{BridgeError, Result},
    mcp::models::{
        CreateAddressParams, ListTransactionsParams, SendTransactionParams, ToolResult,
    },
};

/// Address creation endpoint.
const ADDRESSES_ENDPOINT: &str = "/digital/v1/addresses";
/// Transaction listing endpoint.
const TRANSACTIONS_ENDPOINT: &str = "/digital/v1/transactions";
/// Asset pool detail endpoint (pool id appended).
const ASSET_POOLS_ENDPOINT: &str = "/digital/v1/asset-pools";
/// Transaction request creation endpoint.
const TRANSACTION_REQUESTS_ENDPOINT: &str = "/digital/v1/transaction-requests";

/// Creates a deposit address in the configured asset pool.
///
/// Calls `POST /digital/v1/addresses` with the pool id, network, and
/// reference.
///
/// # Errors
///
/// Returns [`BridgeError::Validation`] for an empty reference, and the
/// client's error for signing, API, or transport failures.
#[instrument(skip(client, params), fields(network = params.network.as_str()))]
pub async fn create_address(
    client: &ApiClient,
    params: CreateAddressParams,
) -> Result<ToolResult> {
    validate_reference(&params.reference)?;

    let body = json!({
        "assetPoolId": client.asset_pool_id(),
        "network": params.network,
        "reference": params.reference,
    });

    let response = client.request(Method::POST, ADDRESSES_ENDPOINT, Some(&body), &[]).await?;

    info!(network = params.network.as_str(), "address created");
    ToolResult::from_json(&response)
}

/// Lists transactions in the configured asset pool.
///
/// Calls `GET /digital/v1/transactions?assetPoolId=<id>`, narrowed with
/// `q=hash:<value>` when a transaction hash is given.
///
/// # Errors
///
/// Returns [`BridgeError::Validation`] for an empty hash filter, and the
/// client's error for signing, API, or transport failures.
#[instrument(skip(client, params))]
pub async fn list_transactions(
    client: &ApiClient,
    params: ListTransactionsParams,
) -> Result<ToolResult> {
    let hash_filter = match params.transaction_hash.as_deref() {
        Some(hash) if hash.trim().is_empty() => {
            return Err(BridgeError::Validation(
                "transaction hash filter cannot be empty".to_owned(),
            ));
        }
        Some(hash) => Some(format!("hash:{hash}")),
        None => None,
    };

    let query = [
        ("assetPoolId", Some(client.asset_pool_id().to_owned())),
        ("q", hash_filter),
    ];

    let response = client.request(Method::GET, TRANSACTIONS_ENDPOINT, None, &query).await?;

    info!("transactions listed");
    ToolResult::from_json(&response)
}

/// Fetches the configured asset pool, including its balances.
///
/// Calls `GET /digital/v1/asset-pools/{assetPoolId}` with the pool id
/// from configuration; the tool takes no parameters.
///
/// # Errors
///
/// Returns the client's error for signing, API, or transport failures.
#[instrument(skip(client))]
pub async fn get_asset_pool_balance(client: &ApiClient) -> Result<ToolResult> {
    let endpoint = format!("{ASSET_POOLS_ENDPOINT}/{}", client.asset_pool_id());
    let response = client.request(Method::GET, &endpoint, None, &[]).await?;

    info!("asset pool balance fetched");
    ToolResult::from_json(&response)
}

/// Submits a transaction request to move an asset to one destination.
///
/// Calls `POST /digital/v1/transaction-requests` with the pool id, asset,
/// network, reference, and a single destination entry.
///
/// # Errors
///
/// Returns [`BridgeError::Validation`] for an empty destination address
/// or reference, or an amount that is not a positive decimal string, and
/// the client's error for signing, API, or transport failures.
#[instrument(
    skip(client, params),
    fields(asset = params.asset.as_str(), network = params.network.as_str())
)]
pub async fn send_transaction_request(
    client: &ApiClient,
    params: SendTransactionParams,
) -> Result<ToolResult> {
    validate_reference(&params.reference)?;
    validate_destination_address(&params.destination_address)?;
    validate_amount(&params.amount)?;

    let body = json!({
        "assetPoolId": client.asset_pool_id(),
        "asset": params.asset,
        "network": params.network,
        "reference": params.reference,
        "destinations": [{
            "address": params.destination_address,
            "amount": params.amount,
        }],
    });

    let response = client
        .request(Method::POST, TRANSACTION_REQUESTS_ENDPOINT, Some(&body), &[])
        .await?;

    info!(asset = params.asset.as_str(), "transaction request submitted");
    ToolResult::from_json(&response)
}

/// Validates a caller-supplied reference string.
fn validate_reference(reference: &str) -> Result<()> {
    if reference.trim().is_empty() {
        return Err(BridgeError::Validation("reference cannot be empty".to_owned()));
    }
    Ok(())
}

/// Validates a destination address.
fn validate_destination_address(address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(BridgeError::Validation("destination address cannot be empty".to_owned()));
    }
    Ok(())
}

/// Validates an amount as a positive decimal string.
///
/// Amounts travel as decimal strings end to end; floats would corrupt
/// sub-unit precision.
fn validate_amount(amount: &str) -> Result<()> {
    let value: Decimal = amount
        .trim()
        .parse()
        .map_err(|_| BridgeError::Validation(format!("amount is not a decimal number: {amount}")))?;

    if value <= Decimal::ZERO {
        return Err(BridgeError::Validation(format!("amount must be positive: {amount}")));
    }

    Ok(())
}
