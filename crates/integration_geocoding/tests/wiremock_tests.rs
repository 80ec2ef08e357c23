//! Integration tests for the geocoding clients using wiremock

use integration_geocoding::{
    GeocodingConfig, GeocodingError, IpLocationClient, NominatimClient, OpenMeteoGeocoder,
    PlaceSearchClient, ReverseLabel,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path, query_param},
};

fn config(mock_server: &MockServer) -> GeocodingConfig {
    GeocodingConfig::for_testing(&mock_server.uri())
}

fn search_response() -> serde_json::Value {
    serde_json::json!({
        "results": [
            {
                "id": 2_988_507,
                "name": "Paris",
                "latitude": 48.853_41,
                "longitude": 2.3488,
                "country": "France",
                "admin1": "Île-de-France"
            },
            {
                "id": 4_717_560,
                "name": "Paris",
                "latitude": 33.660_94,
                "longitude": -95.555_51,
                "country": "United States",
                "admin1": "Texas"
            }
        ],
        "generationtime_ms": 0.5
    })
}

// ============================================================================
// Place search
// ============================================================================

#[tokio::test]
async fn test_search_places_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("name", "Paris"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    let places = client.search_places(" Paris ", 5).await.unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].id, "2988507");
    assert_eq!(places[0].label(), "Paris, France");
    assert_eq!(places[1].admin1.as_deref(), Some("Texas"));
}

#[tokio::test]
async fn test_search_without_results_is_empty() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"generationtime_ms": 0.2})),
        )
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    assert!(client.search_places("Xyzzy", 5).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_search_count_is_capped() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("count", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    assert!(client.search_places("Paris", 200).await.is_ok());
}

#[tokio::test]
async fn test_blank_search_is_rejected() {
    let mock_server = MockServer::start().await;
    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();

    let result = client.search_places("   ", 5).await;
    assert!(matches!(result, Err(GeocodingError::InvalidInput(_))));
}

#[tokio::test]
async fn test_search_rate_limited() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    let result = client.search_places("Paris", 5).await;
    assert!(matches!(result, Err(GeocodingError::RateLimitExceeded)));
}

// ============================================================================
// Label reverse geocoding
// ============================================================================

#[tokio::test]
async fn test_reverse_label_rounds_coordinates() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Paris", "country": "France"}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    let label = client.reverse_label(48.856_613, 2.352_222).await.unwrap();

    assert_eq!(label, ReverseLabel::Found("Paris, France".into()));
}

#[tokio::test]
async fn test_reverse_label_without_results_is_unknown() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    let label = client.reverse_label(0.0, 0.0).await.unwrap();

    assert_eq!(label, ReverseLabel::Unknown);
    assert_eq!(label.text(), "Unknown location");
}

#[tokio::test]
async fn test_reverse_label_upstream_failure_keeps_details() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&mock_server)
        .await;

    let client = OpenMeteoGeocoder::new(&config(&mock_server)).unwrap();
    let label = client.reverse_label(1.0, 2.0).await.unwrap();

    assert_eq!(
        label,
        ReverseLabel::UpstreamFailed {
            status: 500,
            details: "boom".into()
        }
    );
}

// ============================================================================
// Nominatim
// ============================================================================

#[tokio::test]
async fn test_nominatim_raw_passthrough() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("lat", "48.85"))
        .and(query_param("lon", "2.35"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"display_name":"Paris"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = NominatimClient::new(&config(&mock_server)).unwrap();
    let raw = client.reverse_raw("48.85", "2.35").await.unwrap();

    assert_eq!(raw.status, 200);
    assert_eq!(raw.body, r#"{"display_name":"Paris"}"#);
}

#[tokio::test]
async fn test_nominatim_raw_keeps_upstream_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(403).set_body_string(r#"{"error":"blocked"}"#))
        .mount(&mock_server)
        .await;

    let client = NominatimClient::new(&config(&mock_server)).unwrap();
    let raw = client.reverse_raw("1", "2").await.unwrap();

    assert_eq!(raw.status, 403);
    assert!(raw.body.contains("blocked"));
}

#[tokio::test]
async fn test_nominatim_sends_user_agent() {
    let mock_server = MockServer::start().await;
    let mut cfg = config(&mock_server);
    cfg.user_agent = "skycast-test/1.0".to_string();
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .and(header("user-agent", "skycast-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = NominatimClient::new(&cfg).unwrap();
    assert!(client.reverse_raw("1", "2").await.is_ok());
}

#[tokio::test]
async fn test_nominatim_place_details() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "display_name": "Berlin, Deutschland",
            "address": {
                "city": "Berlin",
                "state": "Berlin",
                "country": "Deutschland"
            }
        })))
        .mount(&mock_server)
        .await;

    let client = NominatimClient::new(&config(&mock_server)).unwrap();
    let details = client.reverse_place(52.52, 13.405).await.unwrap();

    assert_eq!(details.city.as_deref(), Some("Berlin"));
    assert_eq!(details.region.as_deref(), Some("Berlin"));
    assert_eq!(details.country.as_deref(), Some("Deutschland"));
}

#[tokio::test]
async fn test_nominatim_place_error_status() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let client = NominatimClient::new(&config(&mock_server)).unwrap();
    let result = client.reverse_place(52.52, 13.405).await;
    assert!(matches!(result, Err(GeocodingError::RequestFailed(_))));
}

#[tokio::test]
async fn test_nominatim_place_is_cached() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reverse"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "address": {"village": "Hallstatt", "country": "Österreich"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let cfg = GeocodingConfig {
        cache_ttl_minutes: 5,
        ..config(&mock_server)
    };
    let client = NominatimClient::new(&cfg).unwrap();

    let first = client.reverse_place(47.562, 13.649).await.unwrap();
    let second = client.reverse_place(47.562, 13.649).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.city.as_deref(), Some("Hallstatt"));
}

// ============================================================================
// IP lookup
// ============================================================================

#[tokio::test]
async fn test_ip_lookup_success() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ip": "203.0.113.7",
            "city": "Paris",
            "region": "Île-de-France",
            "country_name": "France",
            "latitude": 48.85,
            "longitude": 2.35
        })))
        .mount(&mock_server)
        .await;

    let client = IpLocationClient::new(&config(&mock_server)).unwrap();
    let place = client.lookup().await.unwrap().unwrap();

    assert!((place.position.latitude() - 48.85).abs() < f64::EPSILON);
    assert_eq!(place.place.city.as_deref(), Some("Paris"));
    assert_eq!(place.place.country.as_deref(), Some("France"));
}

#[tokio::test]
async fn test_ip_lookup_rate_limited_body_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "error": true,
            "reason": "RateLimited"
        })))
        .mount(&mock_server)
        .await;

    let client = IpLocationClient::new(&config(&mock_server)).unwrap();
    assert!(client.lookup().await.unwrap().is_none());
}

#[tokio::test]
async fn test_ip_lookup_error_status_is_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = IpLocationClient::new(&config(&mock_server)).unwrap();
    assert!(client.lookup().await.unwrap().is_none());
}
