//! Integration tests for the backend client (wiremock-based)

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use bestcar::backend::{ApiError, BackendClient, CarChoice, StopId};

// The client is blocking; run it off the async test runtime.
async fn blocking<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    tokio::task::spawn_blocking(f).await.unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok" })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let status = blocking(move || BackendClient::new(&uri).health()).await.unwrap();
    assert_eq!(status, "ok");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stops_for_system() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stops"))
        .and(query_param("system", "GO Transit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "id": "go transit:union_station",
                "name": "Union Station",
                "line": "Lakeshore West",
                "location": { "lat": 43.645, "lon": -79.38 }
            },
            {
                "id": "go transit:oakville",
                "name": "Oakville",
                "line": "Lakeshore West",
                "location": { "lat": null, "lon": null }
            }
        ])))
        .mount(&server)
        .await;

    let uri = format!("{}/", server.uri());
    let stops = blocking(move || BackendClient::new(&uri).stops("GO Transit"))
        .await
        .unwrap();

    assert_eq!(stops.len(), 2);
    assert_eq!(stops[0].id, StopId::Text("go transit:union_station".into()));
    assert_eq!(stops[1].name, "Oakville");
    assert!(stops[1].location.unwrap().lat.is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stops_non_array_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stops"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stops": [] })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let stops = blocking(move || BackendClient::new(&uri).stops("TTC")).await.unwrap();
    assert!(stops.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_best_car_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/best_car"))
        .and(query_param("origin", "St George"))
        .and(query_param("destination", "Bedford"))
        .and(query_param("system", "TTC"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "station": "st george",
            "exit": "bedford",
            "car": 2,
            "notes": "Bedford exit is closest to car 2.",
            "explanation": "Use car 2 \u{2014} closest to Bedford exit stairs."
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let rec = blocking(move || BackendClient::new(&uri).best_car("St George", "Bedford", "TTC"))
        .await
        .unwrap();

    assert_eq!(rec.car, Some(CarChoice::One(2)));
    assert_eq!(rec.station.as_deref(), Some("st george"));
    assert!(rec.display_line().starts_with("Recommended Car: 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_best_car_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/best_car"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "error": "Station 'Nowhere' not found" })),
        )
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || BackendClient::new(&uri).best_car("Nowhere", "Exit", "TTC"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { code, message } => {
            assert_eq!(code, 404);
            assert_eq!(message, "Station 'Nowhere' not found");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let uri = server.uri();
    let err = blocking(move || BackendClient::new(&uri).health()).await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[test]
fn test_connection_refused() {
    let client = BackendClient::new("http://127.0.0.1:9")
        .with_timeout(std::time::Duration::from_secs(2));
    let err = client.health().unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}
