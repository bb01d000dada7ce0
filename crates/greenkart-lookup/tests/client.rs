//! Integration tests for `OpenFoodFactsClient` using wiremock HTTP mocks.

use greenkart_core::resolve_reward;
use greenkart_lookup::{LookupError, OpenFoodFactsClient};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> OpenFoodFactsClient {
    OpenFoodFactsClient::with_base_url(base_url, "greenkart-test/0.1", Some(5))
        .expect("client construction should not fail")
}

async fn mount_product(server: &MockServer, barcode: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/v0/product/{barcode}.json")))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(server)
        .await;
}

/// Returns a base URL nothing is listening on.
fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn lookup_product_normalizes_found_product() {
    let server = MockServer::start().await;
    mount_product(
        &server,
        "5000112637922",
        json!({
            "status": 1,
            "status_verbose": "product found",
            "product": {
                "product_name": "Sparkling Water",
                "brands": "Fizz Co",
                "image_front_url": "https://images.example/water.jpg",
                "categories": "Beverages, Waters",
                "ecoscore_grade": "a"
            }
        }),
    )
    .await;

    let client = test_client(&server.uri());
    let record = client
        .lookup_product("5000112637922")
        .await
        .expect("product should be found");

    assert_eq!(record.name, "Sparkling Water");
    assert_eq!(record.brand.as_deref(), Some("Fizz Co"));
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://images.example/water.jpg")
    );
    assert_eq!(record.categories.as_deref(), Some("Beverages, Waters"));
    assert_eq!(record.eco_score.as_deref(), Some("A+"));
}

#[tokio::test]
async fn found_product_feeds_reward_resolution() {
    let server = MockServer::start().await;
    mount_product(
        &server,
        "111",
        json!({ "status": 1, "product": { "product_name": "Test Soap", "ecoscore_grade": "b" } }),
    )
    .await;

    let client = test_client(&server.uri());
    let record = client.lookup_product("111").await.expect("found");

    assert_eq!(record.name, "Test Soap");
    assert_eq!(record.eco_score.as_deref(), Some("A"));
    assert_eq!(resolve_reward(record.eco_score.as_deref()), 30);
}

#[tokio::test]
async fn status_zero_resolves_to_none() {
    let server = MockServer::start().await;
    mount_product(
        &server,
        "000",
        json!({
            "status": 0,
            "status_verbose": "product not found",
            "product": { "product_name": "Should be ignored" }
        }),
    )
    .await;

    let client = test_client(&server.uri());
    assert!(client.lookup_product("000").await.is_none());
    assert!(matches!(client.fetch_product("000").await, Ok(None)));
}

#[tokio::test]
async fn empty_product_uses_sentinel_name() {
    let server = MockServer::start().await;
    mount_product(&server, "222", json!({ "status": 1, "product": {} })).await;

    let client = test_client(&server.uri());
    let record = client.lookup_product("222").await.expect("found");
    assert_eq!(record.name, "Unknown Product");
    assert!(record.eco_score.is_none());
}

#[tokio::test]
async fn not_found_body_on_404_is_still_parsed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/404.json"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(&json!({ "status": 0, "status_verbose": "product not found" })),
        )
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(matches!(client.fetch_product("404").await, Ok(None)));
}

#[tokio::test]
async fn malformed_body_resolves_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/333.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(matches!(
        client.fetch_product("333").await,
        Err(LookupError::Deserialize { .. })
    ));
    assert!(client.lookup_product("333").await.is_none());
}

#[tokio::test]
async fn transport_failure_resolves_to_none() {
    let client = test_client(&unreachable_base_url());

    assert!(matches!(
        client.fetch_product("444").await,
        Err(LookupError::Http(_))
    ));
    assert!(client.lookup_product("444").await.is_none());
}

#[tokio::test]
async fn repeated_lookups_are_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v0/product/555.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(&json!({ "status": 1, "product": { "product_name": "Tea" } })),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let lookups = (0..3).map(|_| client.lookup_product("555"));
    let results = futures::future::join_all(lookups).await;

    assert!(results.iter().all(|r| r.as_ref().map(|p| p.name.as_str()) == Some("Tea")));
    // `expect(3)` is verified when the server drops.
}
