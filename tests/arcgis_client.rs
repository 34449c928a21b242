use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use roadnet_export::{
    ArcGisClient, ExportConfig, FeatureSource, QueryParameters, RecordLimit, Region,
    RegionSelector, RoadClass, RoadNetError,
};

fn client_for(server: &MockServer) -> ArcGisClient {
    let config = ExportConfig::new()
        .with_feature_layer_url(format!("{}/FeatureServer", server.uri()))
        .with_timeout(Duration::from_secs(5));
    ArcGisClient::new(config).unwrap()
}

fn expressway_params(limit: RecordLimit) -> QueryParameters {
    QueryParameters::build(
        RoadClass::Expressway,
        RegionSelector::Region(Region::RegionVII),
        limit,
    )
}

async fn received_query(server: &MockServer) -> Vec<(String, String)> {
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    requests[0]
        .url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

fn value_of<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

#[tokio::test]
async fn test_query_sends_filter_and_returns_features() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .and(query_param("where", "REGION='RVII'"))
        .and(query_param("outFields", "*"))
        .and(query_param("returnGeometry", "false"))
        .and(query_param("f", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "features": [
                {"attributes": {"REGION": "RVII", "XPRES_WAY": "E5"}},
                {"attributes": {"REGION": "RVII", "XPRES_WAY": "E6"}}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let features = client_for(&server)
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap();

    assert_eq!(features.len(), 2);
    assert_eq!(features[1].attribute("XPRES_WAY"), Some(&json!("E6")));

    let pairs = received_query(&server).await;
    assert_eq!(value_of(&pairs, "resultRecordCount"), None);
}

#[tokio::test]
async fn test_query_sends_record_count_for_bounded_limit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"features": []})))
        .mount(&server)
        .await;

    let limit = RecordLimit::try_from(5i64).unwrap();
    let features = client_for(&server)
        .query(0, &expressway_params(limit))
        .await
        .unwrap();

    assert!(features.is_empty());
    let pairs = received_query(&server).await;
    assert_eq!(value_of(&pairs, "resultRecordCount"), Some("5"));
}

#[tokio::test]
async fn test_missing_features_key_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/1/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "objectIdFieldName": "OBJECTID",
            "exceededTransferLimit": true
        })))
        .mount(&server)
        .await;

    let params = QueryParameters::build(
        RoadClass::NationalRoad,
        RegionSelector::AllRegions,
        RecordLimit::Unlimited,
    );
    let features = client_for(&server).query(1, &params).await.unwrap();
    assert!(features.is_empty());
}

#[tokio::test]
async fn test_service_error_body_yields_no_features() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"code": 400, "message": "Unable to complete operation.", "details": []}
        })))
        .mount(&server)
        .await;

    let features = client_for(&server)
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap();
    assert!(features.is_empty());
}

#[tokio::test]
async fn test_loosely_shaped_error_body_yields_no_features() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"error":{"code":400,"message":"x","details":null}}"#),
        )
        .mount(&server)
        .await;

    let features = client_for(&server)
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap();
    assert!(features.is_empty());
}

#[tokio::test]
async fn test_invalid_json_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadNetError::Decode { status: 200, .. }));
    assert_eq!(err.to_string(), "Invalid JSON returned (status 200)");
}

#[tokio::test]
async fn test_non_success_status_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/1/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let params = QueryParameters::build(
        RoadClass::NationalRoad,
        RegionSelector::AllRegions,
        RecordLimit::Unlimited,
    );
    let err = client_for(&server).query(1, &params).await.unwrap_err();

    match err {
        RoadNetError::Transport { layer, .. } => assert_eq!(layer, 1),
        other => panic!("expected transport error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = ExportConfig::new()
        .with_feature_layer_url(format!("http://127.0.0.1:{}/FeatureServer", port))
        .with_timeout(Duration::from_secs(2));
    let client = ArcGisClient::new(config).unwrap();

    let err = client
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadNetError::Transport { layer: 0, .. }));
    assert!(err.to_string().starts_with("Request failed for layer 0:"));
}

#[tokio::test]
async fn test_timeout_is_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/FeatureServer/0/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"features": []}))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = ExportConfig::new()
        .with_feature_layer_url(format!("{}/FeatureServer", server.uri()))
        .with_timeout(Duration::from_millis(200));
    let err = ArcGisClient::new(config)
        .unwrap()
        .query(0, &expressway_params(RecordLimit::Unlimited))
        .await
        .unwrap_err();

    assert!(matches!(err, RoadNetError::Transport { layer: 0, .. }));
}
