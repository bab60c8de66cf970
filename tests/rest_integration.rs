use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use wiremock::matchers::{body_string_contains, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kraken_account_client::auth::StaticCredentials;
use kraken_account_client::rest::private::{LedgersRequest, QueryLedgersRequest, TradeVolumeRequest};
use kraken_account_client::rest::{AccountClient, KrakenAccountExt};
use kraken_account_client::{CurrencyPair, KrakenError, LedgerType};
use rust_decimal::Decimal;

fn build_client(server: &MockServer) -> AccountClient {
    build_client_with_retries(server, 0)
}

fn build_client_with_retries(server: &MockServer, retries: u32) -> AccountClient {
    let secret = STANDARD.encode("test_secret");
    let credentials = Arc::new(StaticCredentials::new("test_key", secret));
    AccountClient::builder()
        .base_url(server.uri())
        .credentials(credentials)
        .max_retries(retries)
        .build()
}

fn ok(result: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "error": [],
        "result": result
    }))
}

async fn received_bodies(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| String::from_utf8_lossy(&r.body).into_owned())
        .collect()
}

fn ledger_fixture() -> serde_json::Value {
    serde_json::json!({
        "L4UESK-KG3EQ-UFO4T5": {
            "refid": "TJKLXX-PGMUI-4NTLXU",
            "time": 1688464484.1787,
            "type": "trade",
            "subtype": "",
            "aclass": "currency",
            "asset": "ZUSD",
            "amount": "-24.5000",
            "fee": "0.0490",
            "balance": "459567.9171"
        },
        "LMKZCZ-Z3GVL-CXKK4H": {
            "refid": "TJKLXX-PGMUI-4NTLXU",
            "time": 1688464484.1787,
            "type": "trade",
            "subtype": "",
            "aclass": "currency",
            "asset": "XXBT",
            "amount": "0.0010000000",
            "fee": "0.0000000000",
            "balance": "1.2510000000"
        }
    })
}

#[tokio::test]
async fn test_get_account_balance_sends_signed_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .and(header("API-Key", "test_key"))
        .and(header_exists("API-Sign"))
        .and(header("content-type", "application/x-www-form-urlencoded"))
        .and(body_string_contains("nonce="))
        .respond_with(ok(serde_json::json!({
            "ZUSD": "171288.6158",
            "XXBT": "0.0011000000",
            "DOT": "0.0000000000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let balances = client.get_account_balance().await.unwrap();

    assert_eq!(balances.len(), 3);
    assert_eq!(balances["ZUSD"], "171288.6158".parse::<Decimal>().unwrap());
    assert_eq!(balances["XXBT"], "0.0011".parse::<Decimal>().unwrap());
}

#[tokio::test]
async fn test_get_balance_generic_translates_keys() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok(serde_json::json!({
            "ZUSD": "100.5",
            "XXBT": "0.5",
            "XXDG": "1200",
            "USDT": "42"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let balances = client.get_balance_generic().await.unwrap();

    assert_eq!(balances["USD"], "100.5".parse::<Decimal>().unwrap());
    assert_eq!(balances["BTC"], "0.5".parse::<Decimal>().unwrap());
    assert_eq!(balances["DOGE"], Decimal::from(1200));
    assert_eq!(balances["USDT"], Decimal::from(42));
}

#[tokio::test]
async fn test_get_trade_balance_in_usd() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/TradeBalance"))
        .and(body_string_contains("aclass=currency"))
        .and(body_string_contains("asset=ZUSD"))
        .respond_with(ok(serde_json::json!({
            "eb": "1101.3425",
            "tb": "392.2264",
            "m": "7.0354",
            "n": "-10.0232",
            "c": "21.1063",
            "v": "31.1297",
            "e": "382.2032",
            "mf": "375.1678",
            "ml": "5432.57",
            "uv": "0"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let balance = client.get_trade_balance_in(Some("USD")).await.unwrap();

    assert_eq!(balance.equivalent_balance, "1101.3425".parse::<Decimal>().unwrap());
    assert_eq!(balance.unrealized_pnl, "-10.0232".parse::<Decimal>().unwrap());
    assert_eq!(balance.margin_level, Some("5432.57".parse().unwrap()));
}

#[tokio::test]
async fn test_get_trade_balance_default_valuation_omits_asset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/TradeBalance"))
        .respond_with(ok(serde_json::json!({
            "eb": "1", "tb": "1", "e": "1", "mf": "1"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let balance = client.get_trade_balance(None).await.unwrap();
    assert_eq!(balance.margin, Decimal::ZERO);
    assert!(balance.margin_level.is_none());

    let bodies = received_bodies(&server).await;
    assert!(bodies[0].contains("aclass=currency"));
    assert!(!bodies[0].contains("asset="));
}

#[tokio::test]
async fn test_get_ledger_info_translates_filters() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Ledgers"))
        .respond_with(ok(serde_json::json!({
            "ledger": ledger_fixture(),
            "count": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let entries = client
        .get_ledger_info(Some(LedgerType::Trade), Some("1688464000"), None, None, &["USD", "BTC"])
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    let usd = &entries["L4UESK-KG3EQ-UFO4T5"];
    assert_eq!(usd.ledger_type(), Some(LedgerType::Trade));
    assert_eq!(usd.generic_asset(), Some("USD"));
    assert_eq!(usd.amount, "-24.5".parse::<Decimal>().unwrap());
    assert!(usd.subtype.is_none());

    let bodies = received_bodies(&server).await;
    let body = &bodies[0];
    assert!(body.starts_with("nonce="));
    assert!(body.contains("aclass=currency"));
    assert!(body.contains("asset=ZUSD%2CXXBT"));
    assert!(body.contains("type=trade"));
    assert!(body.contains("start=1688464000"));
    assert!(!body.contains("end="));
    assert!(!body.contains("ofs="));
}

#[tokio::test]
async fn test_get_ledgers_defaults_to_all() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Ledgers"))
        .and(body_string_contains("asset=all"))
        .and(body_string_contains("type=all"))
        .respond_with(ok(serde_json::json!({ "ledger": {}, "count": 0 })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let info = client.get_ledgers(None).await.unwrap();
    assert!(info.ledger.is_empty());
    assert_eq!(info.count, Some(0));
}

#[tokio::test]
async fn test_get_ledgers_with_offset() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Ledgers"))
        .and(body_string_contains("ofs=50"))
        .and(body_string_contains("without_count=true"))
        .respond_with(ok(serde_json::json!({ "ledger": {} })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = LedgersRequest::new().offset("50").without_count(true);
    let info = client.get_ledgers(Some(&request)).await.unwrap();
    assert!(info.count.is_none());
}

#[tokio::test]
async fn test_query_ledgers_joins_ids() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/QueryLedgers"))
        .and(body_string_contains("id=L4UESK-KG3EQ-UFO4T5%2CLMKZCZ-Z3GVL-CXKK4H"))
        .respond_with(ok(ledger_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let entries = client
        .query_ledgers_by_id(&["L4UESK-KG3EQ-UFO4T5", "LMKZCZ-Z3GVL-CXKK4H"])
        .await
        .unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries["LMKZCZ-Z3GVL-CXKK4H"].generic_asset(), Some("BTC"));
}

#[tokio::test]
async fn test_query_ledgers_with_trades() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/QueryLedgers"))
        .and(body_string_contains("id=L4UESK-KG3EQ-UFO4T5&trades=true"))
        .respond_with(ok(ledger_fixture()))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = QueryLedgersRequest::new(["L4UESK-KG3EQ-UFO4T5"]).trades(true);
    let entries = client.query_ledgers(&request).await.unwrap();
    assert_eq!(entries.len(), 2);
}

#[tokio::test]
async fn test_query_ledgers_empty_ids_reports_exchange_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/QueryLedgers"))
        .and(body_string_contains("id="))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EGeneral:Invalid arguments"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.query_ledgers_by_id(&[]).await.unwrap_err();

    match err {
        KrakenError::Api(api) => {
            assert_eq!(api.errors, vec!["EGeneral:Invalid arguments".to_string()]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_get_trade_volume_without_pairs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/TradeVolume"))
        .respond_with(ok(serde_json::json!({
            "currency": "ZUSD",
            "volume": "200709587.4223",
            "fees": null,
            "fees_maker": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let volume = client.get_trade_volume_for(&[]).await.unwrap();

    assert_eq!(volume.currency, "ZUSD");
    assert_eq!(volume.volume, "200709587.4223".parse::<Decimal>().unwrap());
    assert!(volume.fees.is_none());

    let bodies = received_bodies(&server).await;
    assert!(!bodies[0].contains("pair="));
}

#[tokio::test]
async fn test_get_trade_volume_for_pairs() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/TradeVolume"))
        .and(body_string_contains("pair=XXBTZUSD%2CDOTUSD"))
        .respond_with(ok(serde_json::json!({
            "currency": "ZUSD",
            "volume": "0.0000",
            "fees": {
                "XXBTZUSD": {
                    "fee": "0.2600",
                    "minfee": "0.1000",
                    "maxfee": "0.2600",
                    "nextfee": "0.2400",
                    "nextvolume": "50000.0000",
                    "tiervolume": "0.0000"
                }
            },
            "fees_maker": {
                "XXBTZUSD": {
                    "fee": "0.1600",
                    "minfee": "0.0000",
                    "maxfee": "0.1600",
                    "nextfee": null,
                    "nextvolume": null,
                    "tiervolume": "0.0000"
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let pairs = [CurrencyPair::new("BTC", "USD"), CurrencyPair::new("DOT", "USD")];
    let volume = client.get_trade_volume_for(&pairs).await.unwrap();

    let fees = volume.fees.unwrap();
    assert_eq!(fees["XXBTZUSD"].fee, "0.26".parse::<Decimal>().unwrap());
    let maker = volume.fees_maker.unwrap();
    assert!(maker["XXBTZUSD"].nextfee.is_none());
}

#[tokio::test]
async fn test_get_trade_volume_fee_info() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/TradeVolume"))
        .and(body_string_contains("pair=XDGUSD&fee-info=true"))
        .respond_with(ok(serde_json::json!({
            "currency": "ZUSD",
            "volume": "10.0000"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let request = TradeVolumeRequest::new([CurrencyPair::new("DOGE", "USD")]).fee_info(true);
    let volume = client.get_trade_volume(Some(&request)).await.unwrap();
    assert_eq!(volume.volume, Decimal::from(10));
}

#[tokio::test]
async fn test_transport_retry_resends_same_signed_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok(serde_json::json!({ "ZUSD": "1.0" })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client_with_retries(&server, 1);
    let balances = client.get_account_balance().await.unwrap();
    assert_eq!(balances["ZUSD"], Decimal::ONE);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].body, requests[1].body);

    let signatures: Vec<_> = requests
        .iter()
        .map(|r| r.headers.get("API-Sign").unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(signatures[0], signatures[1]);
}

#[tokio::test]
async fn test_error_envelope_is_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EAPI:Invalid nonce"]
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_account_balance().await.unwrap_err();

    let api = err.api_error().expect("api error");
    assert_eq!(api.errors, vec!["EAPI:Invalid nonce".to_string()]);
    assert!(api.is_invalid_nonce());
    assert!(!err.is_local());
}

#[tokio::test]
async fn test_rate_limit_error_stays_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Ledgers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": ["EAPI:Rate limit exceeded", "EGeneral:Temporary lockout"]
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_ledgers(None).await.unwrap_err();

    match err {
        KrakenError::Api(api) => {
            assert!(api.is_rate_limit());
            assert_eq!(api.errors.len(), 2);
            assert_eq!(api.to_string(), "EAPI:Rate limit exceeded, EGeneral:Temporary lockout");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_unsupported_asset_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client
        .get_ledger_info(None, None, None, None, &["USD", "FOO"])
        .await
        .unwrap_err();

    match err {
        KrakenError::UnsupportedAsset(code) => assert_eq!(code, "FOO"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_credentials_fails_before_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ok(serde_json::json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = AccountClient::builder().base_url(server.uri()).build();
    let err = client.get_account_balance().await.unwrap_err();

    assert!(matches!(err, KrakenError::MissingCredentials));
    assert!(err.is_local());
}

#[tokio::test]
async fn test_http_error_without_envelope() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let err = client.get_account_balance().await.unwrap_err();

    match err {
        KrakenError::InvalidResponse(message) => assert!(message.contains("502")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_nonces_increase_across_calls() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/0/private/Balance"))
        .respond_with(ok(serde_json::json!({})))
        .expect(3)
        .mount(&server)
        .await;

    let client = build_client(&server);
    for _ in 0..3 {
        client.get_account_balance().await.unwrap();
    }

    let nonces: Vec<u64> = received_bodies(&server)
        .await
        .iter()
        .map(|body| {
            body.trim_start_matches("nonce=")
                .split('&')
                .next()
                .unwrap()
                .parse()
                .unwrap()
        })
        .collect();

    assert_eq!(nonces.len(), 3);
    assert!(nonces.windows(2).all(|w| w[1] > w[0]));
}
