//! Integration tests for `HyperClient` and its middleware using wiremock.

use std::time::Duration;

use shipkit::middleware::ConcurrencyLimitLayer;
use shipkit::{HttpClient, HyperClient, Method, Request};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param},
};

fn url(server: &MockServer, path: &str) -> url::Url {
    url::Url::parse(&format!("{}{path}", server.uri())).expect("url")
}

#[tokio::test]
async fn test_get_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/parcels/prcl_1"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "prcl_1", "weight": 15.4})),
        )
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/parcels/prcl_1"))
        .header("Accept", "application/json")
        .build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
    let body: serde_json::Value = response.json().expect("json");
    assert_eq!(body["weight"], 15.4);
}

#[tokio::test]
async fn test_post_form_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/trackers"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "tracker%5Btracking_code%5D=EZ1000000001&tracker%5Bcarrier%5D=USPS",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "trk_1"})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let pairs = [
        ("tracker[tracking_code]".to_string(), "EZ1000000001".to_string()),
        ("tracker[carrier]".to_string(), "USPS".to_string()),
    ];
    let request = Request::builder(Method::Post, url(&mock_server, "/v2/trackers"))
        .form(&pairs)
        .build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 201);
}

#[tokio::test]
async fn test_query_parameters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/shipments"))
        .and(query_param("page_size", "2"))
        .and(query_param("purchased", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"shipments": []})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/shipments"))
        .query("page_size", "2")
        .query("purchased", "false")
        .build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_error_status_is_returned_as_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/rates/rate_404"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/rates/rate_404")).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_client_error());
    let err = response.error_for_status().expect_err("404");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_timeout() {
    let mock_server = MockServer::start().await;

    // Delay longer than client timeout
    Mock::given(method("GET"))
        .and(path("/v2/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .timeout(Duration::from_millis(100))
        .build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/slow")).build();

    let err = client.execute(request).await.expect_err("expected timeout error");

    assert!(err.is_timeout(), "Expected timeout error, got: {err}");
}

#[tokio::test]
async fn test_connection_error() {
    let client = HyperClient::new();

    let url = url::Url::parse("http://127.0.0.1:1").expect("url");
    let request = Request::builder(Method::Get, url).build();

    let err = client.execute(request).await.expect_err("expected connection error");

    assert!(err.is_connection(), "Expected connection error, got: {err}");
}

#[tokio::test]
async fn test_retry_on_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/trackers/trk_1"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3) // Initial + 2 retries
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_retry(2).build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/trackers/trk_1")).build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_retry_on_rate_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/trackers"))
        .respond_with(ResponseTemplate::new(429))
        .expect(2) // Initial + 1 retry
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_retry(1).build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/trackers")).build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 429);
}

#[tokio::test]
async fn test_no_retry_on_client_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_retry(3).build();
    let request =
        Request::builder(Method::Get, url(&mock_server, "/v2/addresses/adr_missing")).build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_no_retry_on_post() {
    let mock_server = MockServer::start().await;

    // Buying twice would purchase two labels
    Mock::given(method("POST"))
        .and(path("/v2/shipments/shp_1/buy"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_retry(3).build();
    let request = Request::builder(Method::Post, url(&mock_server, "/v2/shipments/shp_1/buy"))
        .form(&[("rate[id]".to_string(), "rate_1".to_string())])
        .build();

    let response = client.execute(request).await.expect("response");

    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/webhooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"webhooks": []})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/webhooks"))
        .header("Authorization", "Bearer sk_test")
        .build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_middleware_composition() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/batches/batch_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "batch_1"})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .with_retry(1)
        .layer(ConcurrencyLimitLayer::new(4))
        .with_logging()
        .build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/batches/batch_1")).build();

    let response = client.execute(request).await.expect("response");

    assert!(response.is_success());
}

#[tokio::test]
async fn test_concurrency_limit_waits_for_permit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/rates/rate_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "rate_1"}))
                .set_delay(Duration::from_millis(50)),
        )
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .layer(ConcurrencyLimitLayer::new(1))
        .build();
    let request = || Request::builder(Method::Get, url(&mock_server, "/v2/rates/rate_1")).build();

    let (first, second, third) = tokio::join!(
        client.execute(request()),
        client.execute(request()),
        client.execute(request()),
    );

    for response in [first, second, third] {
        assert!(response.expect("response").is_success());
    }
}

#[tokio::test]
async fn test_client_as_tower_service() {
    use tower::ServiceExt;

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/parcels/prcl_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "prcl_1"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .layer(ConcurrencyLimitLayer::new(2))
        .with_retry(1)
        .build();
    let request = Request::builder(Method::Get, url(&mock_server, "/v2/parcels/prcl_1")).build();

    let response = client.oneshot(request).await.expect("response");

    assert!(response.is_success());
}
