//! End-to-end tests for `ShippingClient` endpoints against a wiremock server.

use shipkit::resources::{Address, ObjectMeta, Parcel, Shipment, ShipmentListOptions, Verify};
use shipkit::{ClientConfig, Error, RESPONSE_PARSE_ERROR, RateFilter, ShippingClient};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_string, header, method, path, query_param, query_param_is_missing},
};

async fn setup() -> (MockServer, ShippingClient) {
    let mock_server = MockServer::start().await;
    let config = ClientConfig::builder()
        .api_key("sk_test_123")
        .api_base(format!("{}/v2", mock_server.uri()))
        .user_agent("shipkit-tests")
        .build()
        .expect("config");
    (mock_server, ShippingClient::from_config(config))
}

#[tokio::test]
async fn test_requests_carry_credentials_and_headers() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/parcels/prcl_1"))
        .and(header("Authorization", "Bearer sk_test_123"))
        .and(header("Accept", "application/json"))
        .and(header("User-Agent", "shipkit-tests"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "prcl_1",
            "object": "Parcel",
            "length": 10.0,
            "weight": 15.4
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let parcel = client.get_parcel("prcl_1").await.expect("parcel");

    assert_eq!(parcel.meta.id.as_deref(), Some("prcl_1"));
    assert_eq!(parcel.weight, Some(15.4));
}

#[tokio::test]
async fn test_create_address_sends_form_body_and_verifications() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/addresses"))
        .and(query_param("verify[]", "delivery"))
        .and(header("Content-Type", "application/x-www-form-urlencoded"))
        .and(body_string(
            "address%5Bstreet1%5D=417%20Montgomery%20Street&address%5Bcity%5D=San%20Francisco&address%5Bcountry%5D=US",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "adr_1",
            "object": "Address",
            "street1": "417 MONTGOMERY ST",
            "city": "SAN FRANCISCO",
            "country": "US",
            "verifications": {"delivery": {"success": true, "errors": [], "details": {"latitude": 37.79, "longitude": -122.40}}}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = Address {
        street1: Some("417 Montgomery Street".to_string()),
        city: Some("San Francisco".to_string()),
        country: Some("US".to_string()),
        ..Address::default()
    };
    let created = client
        .create_address(&address, &[Verify::Delivery])
        .await
        .expect("address");

    assert_eq!(created.meta.id.as_deref(), Some("adr_1"));
    let delivery = created
        .verifications
        .and_then(|v| v.delivery)
        .expect("delivery verification");
    assert!(delivery.success);
}

#[tokio::test]
async fn test_verify_address_unwraps_root_element() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_1/verify"))
        .and(query_param("carrier", "USPS"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {"id": "adr_1", "object": "Address", "zip": "94104-1129"},
            "message": "Address verified"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = Address {
        meta: ObjectMeta::with_id("adr_1"),
        ..Address::default()
    };
    let verified = client
        .verify_address(&address, Some("USPS"))
        .await
        .expect("verified");

    assert_eq!(verified.zip.as_deref(), Some("94104-1129"));
}

#[tokio::test]
async fn test_verify_address_creates_unsaved_address_first() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/addresses"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": "adr_new"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/addresses/adr_new/verify"))
        .and(query_param_is_missing("carrier"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"address": {"id": "adr_new", "city": "SF"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let address = Address {
        city: Some("San Francisco".to_string()),
        ..Address::default()
    };
    let verified = client
        .verify_address(&address, None)
        .await
        .expect("verified");

    assert_eq!(verified.meta.id.as_deref(), Some("adr_new"));
    assert_eq!(verified.city.as_deref(), Some("SF"));
}

#[tokio::test]
async fn test_api_error_envelope() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/shipments"))
        .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
            "error": {
                "code": "SHIPMENT.INVALID_PARAMS",
                "message": "Unable to create shipment.",
                "errors": [{"field": "to_address", "message": "is required"}]
            }
        })))
        .mount(&mock_server)
        .await;

    let err = client
        .create_shipment(&Shipment::default())
        .await
        .expect_err("422");

    assert_eq!(err.status(), Some(422));
    assert_eq!(err.api_code(), Some("SHIPMENT.INVALID_PARAMS"));
    assert!(err.is_client_error());
    assert_eq!(
        err.field_errors().first().and_then(|e| e.field.as_deref()),
        Some("to_address")
    );
}

#[tokio::test]
async fn test_api_error_with_unparseable_body() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/shipments/shp_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let err = client.get_shipment("shp_1").await.expect_err("500");

    assert!(err.is_server_error());
    assert_eq!(err.api_code(), Some(RESPONSE_PARSE_ERROR));
    match err {
        Error::Api { message, .. } => assert_eq!(message, "Internal Server Error"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_shape_mismatch_reports_path() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/parcels/prcl_1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"id": "prcl_1", "weight": "heavy"})),
        )
        .mount(&mock_server)
        .await;

    let err = client.get_parcel("prcl_1").await.expect_err("bad weight");

    assert!(
        matches!(err, Error::JsonDeserialization { .. }),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn test_create_guard_does_not_call_the_api() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    let parcel = Parcel {
        meta: ObjectMeta::with_id("prcl_1"),
        ..Parcel::default()
    };
    let err = client.create_parcel(&parcel).await.expect_err("already created");

    assert!(matches!(
        err,
        Error::ResourceAlreadyCreated { resource: "parcel" }
    ));
}

#[tokio::test]
async fn test_ids_stay_inside_their_path_segment() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/users"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "user_1"})))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/addresses/..%2Fusers"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "error": {"code": "NOT_FOUND", "message": "The requested resource could not be found."}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let err = client.get_address("../users").await.expect_err("not found");
    assert!(err.is_not_found(), "{err}");

    let err = client.get_parcel("..").await.expect_err("dot segment");
    assert!(matches!(err, Error::InvalidRequest(_)), "{err}");
}

#[tokio::test]
async fn test_buy_shipment_and_lowest_rate() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/shipments/shp_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "shp_1",
            "rates": [
                {"id": "rate_priority", "carrier": "USPS", "service": "Priority", "rate": "7.58"},
                {"id": "rate_ground", "carrier": "UPS", "service": "Ground", "rate": "9.10"},
                {"id": "rate_first", "carrier": "USPS", "service": "First", "rate": "3.92"}
            ]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v2/shipments/shp_1/buy"))
        .and(body_string("rate%5Bid%5D=rate_first&insurance=100.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "shp_1",
            "tracking_code": "9400100000000000000000",
            "selected_rate": {"id": "rate_first", "carrier": "USPS", "service": "First", "rate": "3.92"},
            "postage_label": {"id": "pl_1", "label_url": "https://example.com/label.png"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let shipment = client.get_shipment("shp_1").await.expect("shipment");
    let rate = shipment
        .lowest_rate(&RateFilter::new().include_carriers(["USPS"]))
        .expect("rated")
        .expect("usps rate");
    let rate_id = rate.meta.id.as_deref().expect("rate id");

    let bought = client
        .buy_shipment("shp_1", rate_id, Some(100.5))
        .await
        .expect("bought");

    assert_eq!(bought.tracking_code.as_deref(), Some("9400100000000000000000"));
    assert_eq!(
        bought.selected_rate.and_then(|r| r.service),
        Some("First".to_string())
    );
}

#[tokio::test]
async fn test_regenerate_rates_replaces_rates() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/shipments/shp_1/rates"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rates": [{"id": "rate_new", "carrier": "USPS", "service": "Priority", "rate": 8.0}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut shipment = Shipment {
        meta: ObjectMeta::with_id("shp_1"),
        ..Shipment::default()
    };
    client
        .regenerate_rates(&mut shipment)
        .await
        .expect("rates");

    let rates = shipment.rates.expect("rates");
    assert_eq!(rates.len(), 1);
    assert_eq!(rates[0].meta.id.as_deref(), Some("rate_new"));
}

#[tokio::test]
async fn test_list_shipments_next_page() {
    let (mock_server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v2/shipments"))
        .and(query_param("page_size", "2"))
        .and(query_param_is_missing("before_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "shipments": [{"id": "shp_3"}, {"id": "shp_2"}],
            "has_more": true
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/shipments"))
        .and(query_param("page_size", "2"))
        .and(query_param("before_id", "shp_2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "shipments": [{"id": "shp_1"}],
            "has_more": false
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let options = ShipmentListOptions {
        page_size: Some(2),
        ..ShipmentListOptions::default()
    };
    let first = client
        .list_shipments(Some(&options))
        .await
        .expect("first page");
    assert!(first.has_more);
    assert_eq!(first.options.as_ref(), Some(&options));

    let second = first.next_page(&client).await.expect("second page");
    assert!(!second.has_more);
    assert_eq!(second.shipments[0].meta.id.as_deref(), Some("shp_1"));

    let empty = shipkit::ShipmentList::default();
    assert!(matches!(
        empty.next_page(&client).await,
        Err(Error::MissingField { .. })
    ));
}

#[tokio::test]
async fn test_create_tracker_and_delete_webhook() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/trackers"))
        .and(body_string(
            "tracker%5Btracking_code%5D=EZ1000000001&tracker%5Bcarrier%5D=USPS",
        ))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": "trk_1",
            "tracking_code": "EZ1000000001",
            "status": "pre_transit"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/v2/webhooks/hook_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let tracker = client
        .create_tracker("USPS", "EZ1000000001")
        .await
        .expect("tracker");
    assert_eq!(tracker.status.as_deref(), Some("pre_transit"));

    client.delete_webhook("hook_1").await.expect("deleted");
}

#[tokio::test]
async fn test_batch_label_body() {
    let (mock_server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/v2/batches/batch_1/label"))
        .and(body_string("file_format=pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "batch_1",
            "state": "label_generating"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let batch = client
        .generate_batch_label("batch_1", "pdf", None)
        .await
        .expect("batch");

    assert_eq!(batch.state.as_deref(), Some("label_generating"));
}
