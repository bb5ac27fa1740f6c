//! Integration tests for `FeedClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers the fixed request headers, both feed
//! normalizations end to end, and every error a fetch can return.

use serde_json::json;
use wiremock::matchers::{header, header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taplist_core::{FeedScalar, SelectedValue};
use taplist_scraper::{FeedClient, ScraperError};

const TEST_UA: &str = "Mozilla/5.0 (taplist-test)";

fn test_client() -> FeedClient {
    FeedClient::new(5, TEST_UA).expect("failed to build test FeedClient")
}

fn tap_feed() -> serde_json::Value {
    json!([
        {
            "nomeDaCervejaria": "Colorado",
            "nome": "Appia",
            "estilo": "Honey Wheat",
            "abv": 5.5,
            "ibu": 10,
            "volume": "300ml",
            "preco": 16.0,
            "servico": "Copo",
            "volume1": "1L",
            "preco1": 45.0,
            "servico1": "Growler"
        },
        {
            "nomeDaCervejaria": "Colorado",
            "nome": "Indica",
            "estilo": "IPA",
            "abv": "7,0",
            "volume": "300ml",
            "preco": "18,00"
        },
        {
            "nomeDaCervejaria": "Dogma",
            "nome": "Rizoma",
            "volume": "500ml",
            "preco": 24,
            "servico": "Caneca"
        }
    ])
}

fn menu_feed() -> serde_json::Value {
    json!([
        {"nome": "Batata Frita", "nomeDoGrupo": "Porções", "valorese": "[{\"valor\": 0}, {\"valor\": 32.9}]"},
        {"nome": "Água", "nomeDoGrupo": "Bebidas", "valorese": "[{\"valor\": -1}]"},
        {"nome": "Quebrado", "nomeDoGrupo": "Bebidas", "valorese": "not json"}
    ])
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_records_sends_browser_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hsys"))
        .and(header("user-agent", TEST_UA))
        .and(header_regex(
            "accept",
            r"^application/json, text/javascript, \*/\*; q=0\.01$",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client()
        .fetch_records(&format!("{}/hsys", server.uri()))
        .await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_records_skips_non_object_entries() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hsys"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([{"nome": "A"}, null, 5, {"nome": "B"}])),
        )
        .mount(&server)
        .await;

    let records = test_client()
        .fetch_records(&format!("{}/hsys", server.uri()))
        .await
        .expect("fetch");

    assert_eq!(records.len(), 2);
    assert_eq!(records[1].text("nome").as_deref(), Some("B"));
}

// ---------------------------------------------------------------------------
// Brewery feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_brewery_catalog_groups_and_extracts_tiers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hsys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tap_feed()))
        .mount(&server)
        .await;

    let catalog = test_client()
        .fetch_brewery_catalog(&format!("{}/hsys", server.uri()))
        .await
        .expect("fetch brewery catalog");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.groups()[0].brewery, "Colorado");
    assert_eq!(catalog.groups()[1].brewery, "Dogma");

    let colorado = catalog.get("Colorado").expect("Colorado group");
    assert_eq!(colorado.len(), 2);
    assert_eq!(colorado[0].price_tiers.len(), 2);
    assert_eq!(colorado[0].price_tiers[1].service, "Growler");
    assert_eq!(colorado[1].abv, Some(7.0));
    assert!(
        colorado[1].price_tiers.is_empty(),
        "Indica has no servico and must carry no tiers"
    );

    let dogma = catalog.get("Dogma").expect("Dogma group");
    assert_eq!(dogma[0].price_tiers[0].price, FeedScalar::Number(24.0));
}

// ---------------------------------------------------------------------------
// Product feed
// ---------------------------------------------------------------------------

#[tokio::test]
async fn fetch_product_catalog_selects_first_positive_value() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mppa"))
        .respond_with(ResponseTemplate::new(200).set_body_json(menu_feed()))
        .mount(&server)
        .await;

    let catalog = test_client()
        .fetch_product_catalog(&format!("{}/mppa", server.uri()))
        .await
        .expect("malformed embedded JSON must not fail the fetch");

    assert_eq!(catalog.len(), 3);
    assert_eq!(catalog[0].value, SelectedValue::Available(32.9));
    assert_eq!(catalog[1].value, SelectedValue::NotAvailable);
    assert_eq!(catalog[2].value, SelectedValue::NotAvailable);
    assert_eq!(catalog[2].name.as_deref(), Some("Quebrado"));
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_success_status_is_upstream_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mppa"))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client()
        .fetch_product_catalog(&format!("{}/mppa", server.uri()))
        .await;

    assert!(
        matches!(result, Err(ScraperError::UpstreamUnavailable { status: 502, .. })),
        "expected UpstreamUnavailable(502), got: {result:?}"
    );
}

#[tokio::test]
async fn not_found_is_upstream_unavailable_without_retry() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hsys"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_brewery_catalog(&format!("{}/hsys", server.uri()))
        .await
        .expect_err("404 must fail");

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn non_array_body_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/hsys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "session expired"})))
        .mount(&server)
        .await;

    let result = test_client()
        .fetch_brewery_catalog(&format!("{}/hsys", server.uri()))
        .await;

    assert!(
        matches!(result, Err(ScraperError::Deserialize { .. })),
        "expected Deserialize, got: {result:?}"
    );
}
