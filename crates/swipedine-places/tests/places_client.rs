//! Integration tests for `PlacesClient::fetch_all_places`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made. Covers both backends: the legacy pagination and
//! status-envelope behavior, and the modern POST contract (headers, body,
//! empty-object responses).

use serde_json::json;
use wiremock::matchers::{
    body_partial_json, header, header_exists, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, ResponseTemplate};

use swipedine_core::app_config::ProviderKind;
use swipedine_core::geo::Coordinate;
use swipedine_core::query::SearchQuery;
use swipedine_places::{PlacesClient, PlacesError, RawPlace};

const NEARBY_PATH: &str = "/maps/api/place/nearbysearch/json";
const SEARCH_NEARBY_PATH: &str = "/v1/places:searchNearby";

/// Builds a `PlacesClient` suitable for tests: 5-second timeout, descriptive
/// UA, zero pacing delay so multi-page tests do not sleep.
fn test_client(provider: ProviderKind, base_url: &str) -> PlacesClient {
    PlacesClient::with_base_url("test-key", provider, 5, "swipedine-test/0.1", 5, 0, base_url)
        .expect("failed to build test PlacesClient")
}

/// Same, with an explicit page cap for cap-specific tests.
fn test_client_with_cap(base_url: &str, max_pages: usize) -> PlacesClient {
    PlacesClient::with_base_url(
        "test-key",
        ProviderKind::Legacy,
        5,
        "swipedine-test/0.1",
        max_pages,
        0,
        base_url,
    )
    .expect("failed to build test PlacesClient")
}

fn test_query() -> SearchQuery {
    SearchQuery::new(Coordinate::new(38.7223, -9.1393), 1000.0)
}

/// Minimal valid legacy page with one place and an optional token.
fn legacy_page_json(place_id: &str, next_token: Option<&str>) -> serde_json::Value {
    let mut page = json!({
        "status": "OK",
        "results": [{
            "place_id": place_id,
            "name": "Test Spot",
            "vicinity": "Rua de Teste 1",
            "rating": 4.1,
            "price_level": 1,
            "types": ["restaurant"],
            "geometry": {"location": {"lat": 38.72, "lng": -9.14}}
        }]
    });
    if let Some(token) = next_token {
        page["next_page_token"] = json!(token);
    }
    page
}

/// Minimal valid modern page with the given place ids.
fn modern_page_json(place_ids: &[&str]) -> serde_json::Value {
    let places: Vec<serde_json::Value> = place_ids
        .iter()
        .map(|id| {
            json!({
                "id": id,
                "displayName": {"text": "Test Spot", "languageCode": "en"},
                "formattedAddress": "Rua de Teste 1, Lisboa",
                "rating": 4.4,
                "priceLevel": "PRICE_LEVEL_MODERATE",
                "types": ["restaurant"],
                "location": {"latitude": 38.72, "longitude": -9.14}
            })
        })
        .collect();
    json!({ "places": places })
}

fn legacy_place_id(place: &RawPlace) -> &str {
    match place {
        RawPlace::Legacy(p) => &p.place_id,
        RawPlace::Modern(_) => panic!("expected a legacy place"),
    }
}

fn modern_place_id(place: &RawPlace) -> &str {
    match place {
        RawPlace::Modern(p) => &p.id,
        RawPlace::Legacy(_) => panic!("expected a modern place"),
    }
}

// ---------------------------------------------------------------------------
// Legacy – zero results
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_zero_results_is_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&json!({"status": "ZERO_RESULTS"})),
        )
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(
        result.unwrap().is_empty(),
        "expected empty Vec for ZERO_RESULTS"
    );
}

// ---------------------------------------------------------------------------
// Legacy – single page
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_single_page_returns_places() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("type", "restaurant"))
        .and(query_param("location", "38.7223,-9.1393"))
        .and(query_param("radius", "1000"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&legacy_page_json("p1", None)))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let places = result.unwrap();
    assert_eq!(places.len(), 1, "expected exactly 1 place");
    assert_eq!(legacy_place_id(&places[0]), "p1");
}

// ---------------------------------------------------------------------------
// Legacy – pagination across two pages
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_follows_token_and_concatenates_pages() {
    let server = MockServer::start().await;

    // Page 1: one place plus a continuation token. Exactly one request.
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&legacy_page_json("p1", Some("tok-2"))),
        )
        .expect(1)
        .mount(&server)
        .await;

    // Page 2: matched only when the token is replayed verbatim; the
    // continuation request must not repeat the stale search parameters.
    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("pagetoken", "tok-2"))
        .and(query_param("key", "test-key"))
        .and(query_param_is_missing("location"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&legacy_page_json("p2", None)))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let places = result.unwrap();
    assert_eq!(places.len(), 2, "expected 2 places across 2 pages");
    assert_eq!(legacy_place_id(&places[0]), "p1");
    assert_eq!(legacy_place_id(&places[1]), "p2");
}

// ---------------------------------------------------------------------------
// Legacy – provider rejection inside the envelope
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_request_denied_is_provider_status_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({
            "status": "REQUEST_DENIED",
            "error_message": "The provided API key is invalid."
        })))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err for REQUEST_DENIED");
    match result.unwrap_err() {
        PlacesError::ProviderStatus { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(
                message.as_deref(),
                Some("The provided API key is invalid.")
            );
        }
        other => panic!("expected PlacesError::ProviderStatus, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Legacy – HTTP and body failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn legacy_5xx_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err for 503 response");
    match result.unwrap_err() {
        PlacesError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected PlacesError::UnexpectedStatus, got: {other:?}"),
    }
}

#[tokio::test]
async fn legacy_malformed_json_is_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err for malformed JSON response");
    assert!(
        matches!(result.unwrap_err(), PlacesError::Deserialize { .. }),
        "expected PlacesError::Deserialize"
    );
}

#[tokio::test]
async fn legacy_second_page_failure_discards_first_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param_is_missing("pagetoken"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&legacy_page_json("p1", Some("tok-fail"))),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .and(query_param("pagetoken", "tok-fail"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Legacy, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err when page 2 returns 503");
    match result.unwrap_err() {
        PlacesError::UnexpectedStatus { status, .. } => assert_eq!(status, 503),
        other => panic!("expected PlacesError::UnexpectedStatus, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Legacy – page cap
// ---------------------------------------------------------------------------

/// A server that hands out a token on every page must not be followed
/// forever: the cap fails the search after exactly `max_pages` requests.
#[tokio::test]
async fn legacy_endless_tokens_hit_page_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(NEARBY_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(&legacy_page_json("p1", Some("tok-again"))),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client_with_cap(&server.uri(), 2);
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err when cap is exceeded");
    match result.unwrap_err() {
        PlacesError::PageLimit { max_pages } => assert_eq!(max_pages, 2),
        other => panic!("expected PlacesError::PageLimit, got: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Modern – single page and request contract
// ---------------------------------------------------------------------------

#[tokio::test]
async fn modern_search_sends_headers_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_NEARBY_PATH))
        .and(header("X-Goog-Api-Key", "test-key"))
        .and(header_exists("X-Goog-FieldMask"))
        .and(body_partial_json(json!({
            "includedTypes": ["restaurant"],
            "maxResultCount": 20,
            "locationRestriction": {
                "circle": {
                    "center": {"latitude": 38.7223, "longitude": -9.1393},
                    "radius": 1000.0
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&modern_page_json(&["m1", "m2"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Modern, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let places = result.unwrap();
    assert_eq!(places.len(), 2, "expected both places from the single page");
    assert_eq!(modern_place_id(&places[0]), "m1");
    assert_eq!(modern_place_id(&places[1]), "m2");
}

#[tokio::test]
async fn modern_price_cap_expands_to_symbolic_tiers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_NEARBY_PATH))
        .and(body_partial_json(json!({
            "priceLevels": ["PRICE_LEVEL_INEXPENSIVE", "PRICE_LEVEL_MODERATE"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&modern_page_json(&["m1"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Modern, &server.uri());
    let query = test_query().with_max_price_level(2);
    let result = client.fetch_all_places(&query).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
}

/// Zero matches arrive as a bare `{}` on this backend, not an empty array.
#[tokio::test]
async fn modern_empty_object_body_is_empty_success() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_NEARBY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(&json!({})))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Modern, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    assert!(result.unwrap().is_empty(), "expected empty Vec for {{}}");
}

#[tokio::test]
async fn modern_403_is_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(SEARCH_NEARBY_PATH))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let client = test_client(ProviderKind::Modern, &server.uri());
    let result = client.fetch_all_places(&test_query()).await;

    assert!(result.is_err(), "expected Err for 403 response");
    match result.unwrap_err() {
        PlacesError::UnexpectedStatus { status, .. } => assert_eq!(status, 403),
        other => panic!("expected PlacesError::UnexpectedStatus, got: {other:?}"),
    }
}
