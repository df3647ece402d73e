//! Integration tests for the Layer1 MCP bridge.
//!
//! Tests the end-to-end flow from tool invocation through signature
//! generation to the HTTP request on the wire, using a local one-shot
//! HTTP listener in place of the remote API.

use std::{
    io::{Read, Write},
    net::{TcpListener, TcpStream},
    sync::{LazyLock, mpsc},
    thread,
};

use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use layer1_mcp_bridge::{
    ApiClient, BridgeConfig, BridgeError, RequestSigner,
    mcp::{
        Asset, CreateAddressParams, ListTransactionsParams, Network, SendTransactionParams,
        create_address, get_asset_pool_balance, list_transactions, send_transaction_request,
    },
};
use rsa::{
    RsaPrivateKey,
    pkcs1v15::{Signature, VerifyingKey},
    pkcs8::{EncodePrivateKey, LineEnding},
};
use sha2::Sha256;
use signature::Verifier;

static TEST_KEY: LazyLock<RsaPrivateKey> = LazyLock::new(|| {
    RsaPrivateKey::new(&mut rand::thread_rng(), 2048).expect("RSA key generation")
});

fn test_key_pem() -> String {
    TEST_KEY.to_pkcs8_pem(LineEnding::LF).expect("PEM encoding").to_string()
}

fn test_client(base_url: &str) -> ApiClient {
    let config = BridgeConfig {
        base_url: base_url.to_owned(),
        client_id: "client-1".to_owned(),
        private_key_pem: test_key_pem(),
        asset_pool_id: "p1".to_owned(),
    };
    ApiClient::new(&config).expect("client construction")
}

/// Serves exactly one HTTP response on an ephemeral port and hands the
/// raw request text back through a channel.
fn spawn_one_shot_server(status: &'static str, body: &'static str) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_request(&mut stream);
        tx.send(request).expect("send captured request");

        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: \
             {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).expect("write response");
    });

    (format!("http://{addr}"), rx)
}

/// Reads one HTTP request (headers plus Content-Length body) as text.
fn read_request(stream: &mut TcpStream) -> String {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    loop {
        let n = stream.read(&mut buf).expect("read request");
        data.extend_from_slice(&buf[..n]);

        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&data[..pos]);
            let content_length = headers
                .lines()
                .find_map(|line| {
                    let (name, value) = line.split_once(':')?;
                    name.eq_ignore_ascii_case("content-length")
                        .then(|| value.trim().parse::<usize>().ok())?
                })
                .unwrap_or(0);

            if data.len() - (pos + 4) >= content_length {
                return String::from_utf8_lossy(&data).into_owned();
            }
        }

        if n == 0 {
            return String::from_utf8_lossy(&data).into_owned();
        }
    }
}

fn header_value<'a>(request: &'a str, name: &str) -> Option<&'a str> {
    request.lines().find_map(|line| {
        let (header, value) = line.split_once(':')?;
        header.eq_ignore_ascii_case(name).then(|| value.trim())
    })
}

fn request_body(request: &str) -> &str {
    request.split_once("\r\n\r\n").map_or("", |(_, body)| body)
}

#[tokio::test]
async fn test_create_address_signs_and_dispatches() {
    let (base_url, rx) = spawn_one_shot_server("201 Created", r#"{"id":"addr-1"}"#);
    let client = test_client(&base_url);

    let params = CreateAddressParams {
        network: Network::Ethereum,
        reference: "order-42".to_owned(),
    };
    let result = create_address(&client, params).await.expect("tool call");
    assert!(result.text.contains("addr-1"));

    let request = rx.recv().expect("captured request");
    assert!(request.starts_with("POST /digital/v1/addresses HTTP/1.1\r\n"));
    assert_eq!(header_value(&request, "content-type"), Some("application/json"));
    assert_eq!(header_value(&request, "accept"), Some("application/json"));

    let signature_input = header_value(&request, "signature-input").expect("Signature-Input");
    assert!(
        signature_input
            .starts_with("sig=(\"@method\" \"@target-uri\" \"content-digest\");created=")
    );
    assert!(signature_input.contains("keyid=\"client-1\""));
    assert!(signature_input.contains("alg=\"rsa-v1_5-sha256\""));

    let signature = header_value(&request, "signature").expect("Signature");
    assert!(signature.starts_with("sig=:"));
    assert!(signature.ends_with(':'));

    // The digest header must match the body actually transmitted.
    let body = request_body(&request);
    assert!(body.contains("\"assetPoolId\":\"p1\""));
    assert!(body.contains("\"network\":\"ETHEREUM\""));
    assert_eq!(
        header_value(&request, "content-digest"),
        Some(RequestSigner::compute_content_digest(body).as_str())
    );
}

#[tokio::test]
async fn test_signature_verifiable_from_the_wire() {
    let (base_url, rx) = spawn_one_shot_server("200 OK", r#"{"ok":true}"#);
    let client = test_client(&base_url);

    let params = CreateAddressParams {
        network: Network::Polygon,
        reference: "order-7".to_owned(),
    };
    create_address(&client, params).await.expect("tool call");

    let request = rx.recv().expect("captured request");
    let signature_input = header_value(&request, "signature-input").expect("Signature-Input");
    let signature_header = header_value(&request, "signature").expect("Signature");
    let content_digest = header_value(&request, "content-digest").expect("Content-Digest");

    // Reconstruct the signature base exactly as the remote verifier would,
    // from the request alone plus the known base URL.
    let created: u64 = signature_input
        .split("created=")
        .nth(1)
        .and_then(|s| s.split(';').next())
        .expect("created parameter")
        .parse()
        .expect("created is unix seconds");

    let target_uri = format!("{base_url}/digital/v1/addresses");
    let base = format!(
        "\"@method\": POST\n\"@target-uri\": {target_uri}\n\"content-digest\": \
         {content_digest}\n\"@signature-params\": (\"@method\" \"@target-uri\" \
         \"content-digest\");created={created};keyid=\"client-1\";alg=\"rsa-v1_5-sha256\""
    );

    let sig_b64 = signature_header
        .strip_prefix("sig=:")
        .and_then(|s| s.strip_suffix(':'))
        .expect("signature envelope");
    let sig_bytes = BASE64.decode(sig_b64).expect("signature base64");
    let signature = Signature::try_from(sig_bytes.as_slice()).expect("signature bytes");

    let verifying_key = VerifyingKey::<Sha256>::new(TEST_KEY.to_public_key());
    assert!(
        verifying_key.verify(base.as_bytes(), &signature).is_ok(),
        "independently reconstructed base must verify"
    );
}

#[tokio::test]
async fn test_list_transactions_get_has_no_digest() {
    let (base_url, rx) = spawn_one_shot_server("200 OK", r#"{"transactions":[]}"#);
    let client = test_client(&base_url);

    list_transactions(&client, ListTransactionsParams::default()).await.expect("tool call");

    let request = rx.recv().expect("captured request");
    assert!(request.starts_with("GET /digital/v1/transactions?assetPoolId=p1 HTTP/1.1\r\n"));
    // No body, so no digest anywhere.
    assert!(header_value(&request, "content-digest").is_none());
    let signature_input = header_value(&request, "signature-input").expect("Signature-Input");
    assert!(signature_input.starts_with("sig=(\"@method\" \"@target-uri\");created="));
    assert!(!signature_input.contains("content-digest"));
    // The q filter is omitted entirely when no hash is given.
    assert!(!request.contains("q=hash"));
}

#[tokio::test]
async fn test_list_transactions_hash_filter() {
    let (base_url, rx) = spawn_one_shot_server("200 OK", r#"{"transactions":[]}"#);
    let client = test_client(&base_url);

    let params = ListTransactionsParams { transaction_hash: Some("0xabc123".to_owned()) };
    list_transactions(&client, params).await.expect("tool call");

    let request = rx.recv().expect("captured request");
    assert!(
        request.starts_with(
            "GET /digital/v1/transactions?assetPoolId=p1&q=hash%3A0xabc123 HTTP/1.1\r\n"
        )
    );
}

#[tokio::test]
async fn test_get_asset_pool_balance_uses_configured_pool() {
    let (base_url, rx) = spawn_one_shot_server("200 OK", r#"{"balances":[]}"#);
    let client = test_client(&base_url);

    let result = get_asset_pool_balance(&client).await.expect("tool call");
    assert!(result.text.contains("balances"));

    let request = rx.recv().expect("captured request");
    assert!(request.starts_with("GET /digital/v1/asset-pools/p1 HTTP/1.1\r\n"));
}

#[tokio::test]
async fn test_send_transaction_request_body_shape() {
    let (base_url, rx) = spawn_one_shot_server("201 Created", r#"{"id":"txr-1"}"#);
    let client = test_client(&base_url);

    let params = SendTransactionParams {
        destination_address: "0xdeadbeef".to_owned(),
        amount: "0.05".to_owned(),
        asset: Asset::Eth,
        network: Network::Ethereum,
        reference: "payout-9".to_owned(),
    };
    send_transaction_request(&client, params).await.expect("tool call");

    let request = rx.recv().expect("captured request");
    assert!(request.starts_with("POST /digital/v1/transaction-requests HTTP/1.1\r\n"));

    let body: serde_json::Value = serde_json::from_str(request_body(&request)).expect("JSON body");
    assert_eq!(body["assetPoolId"], "p1");
    assert_eq!(body["asset"], "ETH");
    assert_eq!(body["network"], "ETHEREUM");
    assert_eq!(body["reference"], "payout-9");
    assert_eq!(body["destinations"][0]["address"], "0xdeadbeef");
    // Amounts stay decimal strings on the wire.
    assert_eq!(body["destinations"][0]["amount"], "0.05");
}

#[tokio::test]
async fn test_non_2xx_surfaces_as_api_error() {
    let (base_url, _rx) = spawn_one_shot_server(
        "422 Unprocessable Entity",
        r#"{"error":"bad reference"}"#,
    );
    let client = test_client(&base_url);

    let params = CreateAddressParams {
        network: Network::Ethereum,
        reference: "order-42".to_owned(),
    };
    let result = create_address(&client, params).await;

    let Err(BridgeError::Api { status, body }) = result else {
        panic!("expected ApiError, got {result:?}");
    };
    assert_eq!(status, 422);
    assert!(body.contains("bad reference"));
}

#[tokio::test]
async fn test_connection_refused_surfaces_as_network_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind listener");
        listener.local_addr().expect("local addr").port()
    };
    let client = test_client(&format!("http://127.0.0.1:{port}"));

    let result = get_asset_pool_balance(&client).await;
    assert!(matches!(result, Err(BridgeError::Network(_))));
}

#[tokio::test]
async fn test_validation_failure_precedes_network() {
    // Unroutable TEST-NET address: a validation failure must return long
    // before any connection attempt.
    let client = test_client("https://192.0.2.1");

    let params = CreateAddressParams { network: Network::Ethereum, reference: "  ".to_owned() };
    let result = create_address(&client, params).await;
    assert!(matches!(result, Err(BridgeError::Validation(_))));

    let params = SendTransactionParams {
        destination_address: "0xdeadbeef".to_owned(),
        amount: "not-a-number".to_owned(),
        asset: Asset::Eth,
        network: Network::Ethereum,
        reference: "r1".to_owned(),
    };
    let result = send_transaction_request(&client, params).await;
    assert!(matches!(result, Err(BridgeError::Validation(_))));
}

#[test]
fn test_client_rejects_malformed_key_at_startup() {
    let config = BridgeConfig {
        base_url: "https://api.sandbox.layer1.com".to_owned(),
        client_id: "client-1".to_owned(),
        private_key_pem: "!!! not a key".to_owned(),
        asset_pool_id: "p1".to_owned(),
    };
    assert!(matches!(ApiClient::new(&config), Err(BridgeError::KeyFormat(_))));
}
