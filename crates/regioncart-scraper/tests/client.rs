//! Integration tests for `AuchanClient` using wiremock HTTP mocks.

use regioncart_core::MerchantId;
use regioncart_scraper::{AuchanClient, FetchError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AuchanClient {
    AuchanClient::new(base_url, 5, "regioncart-test/0.1", 0, 0)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_shops_returns_merchants_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/shops"))
        .and(query_param("regionId", "1"))
        .and(header("user-agent", "regioncart-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "shops": [
                {"merchant_id": 10, "name": "Auchan Moscow"},
                {"merchant_id": 11, "name": "Auchan Moscow 2"}
            ]
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let shops = client.fetch_shops(1).await.expect("should parse shops");

    assert_eq!(shops.len(), 2);
    assert_eq!(shops[0].merchant_id, MerchantId(10));
}

#[tokio::test]
async fn fetch_top_categories_sends_depth_and_filters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .and(query_param("max_depth", "2"))
        .and(query_param("merchant_id", "10"))
        .and(query_param("active_only", "1"))
        .and(query_param("cashback_only", "0"))
        .and(query_param("show_hidden", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"code": "food", "activeProductsCount": 9000, "items": []},
            {"code": "home", "activeProductsCount": 400}
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let categories = client
        .fetch_top_categories(MerchantId(10))
        .await
        .expect("should parse categories");

    let codes: Vec<_> = categories.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["food", "home"]);
}

#[tokio::test]
async fn fetch_subcategories_reads_first_node_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .and(query_param("node_code", "food"))
        .and(query_param("merchant_id", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "code": "food",
                "items": [
                    {"code": "drinks", "activeProductsCount": 155},
                    {"code": "toys", "activeProductsCount": "41"}
                ]
            }
        ])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let nodes = client
        .fetch_subcategories("food", MerchantId(10))
        .await
        .expect("should parse subcategories");

    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[0].code, "drinks");
    assert_eq!(nodes[0].active_products_count, 155);
    assert_eq!(nodes[1].active_products_count, 41);
}

#[tokio::test]
async fn fetch_subcategories_without_items_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .and(query_param("node_code", "leaf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"code": "leaf"}])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/categories"))
        .and(query_param("node_code", "gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    assert!(client
        .fetch_subcategories("leaf", MerchantId(1))
        .await
        .unwrap()
        .is_empty());
    assert!(client
        .fetch_subcategories("gone", MerchantId(1))
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn fetch_products_page_posts_filter_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/catalog/products"))
        .and(query_param("merchantId", "10"))
        .and(query_param("page", "3"))
        .and(query_param("perPage", "40"))
        .and(body_partial_json(json!({
            "filter": {
                "category": "drinks",
                "promo_only": false,
                "active_only": true,
                "cashback_only": false
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {"productId": 1, "title": "Water", "code": "water-1l",
                 "brand": {"name": "Spring"}, "price": {"value": 39.9}, "oldPrice": null}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .fetch_products_page("drinks", MerchantId(10), 3, 40)
        .await
        .expect("should parse products page");

    assert_eq!(page.items.len(), 1);
}

#[tokio::test]
async fn service_unavailable_is_transient_and_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/shops"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let client = AuchanClient::new(&server.uri(), 5, "regioncart-test/0.1", 3, 0).unwrap();
    let result = client.fetch_shops(1).await;

    assert!(
        matches!(result, Err(FetchError::TransientUnavailable { .. })),
        "expected TransientUnavailable, got: {result:?}"
    );
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>busy</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_products_page("drinks", MerchantId(10), 1, 40)
        .await;

    assert!(
        matches!(result, Err(FetchError::Malformed { .. })),
        "expected Malformed, got: {result:?}"
    );
}

#[tokio::test]
async fn wrong_shape_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/catalog/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client
        .fetch_products_page("drinks", MerchantId(10), 1, 40)
        .await;

    assert!(matches!(result, Err(FetchError::Malformed { .. })));
}

#[tokio::test]
async fn other_status_is_unexpected() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/shops"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.fetch_shops(1).await;

    assert!(
        matches!(result, Err(FetchError::UnexpectedStatus { status: 404, .. })),
        "expected UnexpectedStatus(404), got: {result:?}"
    );
}
