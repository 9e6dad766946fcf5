// Router tests driven through tower's oneshot against an in-memory snapshot

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt; // For `.collect()`
use serde_json::{json, Value};
use tower::ServiceExt; // For `oneshot`

use hawaii_climate_api::api::{create_router, AppState};

async fn create_test_app(seeded: bool) -> axum::Router {
    let pool = if seeded {
        common::seeded_pool().await
    } else {
        common::empty_pool().await
    };
    let state = AppState {
        climate_service: common::service_for(&pool),
    };
    create_router(state)
}

async fn get(app: axum::Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_index_lists_routes() {
    let app = create_test_app(true).await;

    let (status, body) = get(app, "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("/api/v1.0/precipitation"));
    assert!(html.contains("/api/v1.0/&lt;start&gt;/&lt;end&gt;"));
}

#[tokio::test]
async fn test_precipitation_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/precipitation").await;

    assert_eq!(status, StatusCode::OK);
    let readings = json.as_array().unwrap();
    assert_eq!(readings.len(), 5);
    assert_eq!(readings[0], json!({"date": "2016-08-23", "precipitation": null}));
    assert_eq!(readings[1], json!({"date": "2017-01-15", "precipitation": 0.5}));
}

#[tokio::test]
async fn test_stations_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/stations").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([common::WAIKIKI, common::KANEOHE, common::WAIHEE])
    );
}

#[tokio::test]
async fn test_tobs_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/tobs").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!([
            {"date": "2016-08-23", "temperature": 71.0},
            {"date": "2017-01-15", "temperature": 74.0},
            {"date": "2017-08-23", "temperature": 78.0}
        ])
    );
}

#[tokio::test]
async fn test_temperature_range_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2017-08-20/2017-08-23").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        json!({
            "Minimum Temperature": "78.00 F",
            "Average Temperature": "79.33 F",
            "Maximum Temperature": "81.00 F"
        })
    );
}

#[tokio::test]
async fn test_temperature_start_endpoint() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2015-01-01").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["Minimum Temperature"], "60.00 F");
    assert_eq!(json["Maximum Temperature"], "81.00 F");
}

#[tokio::test]
async fn test_invalid_start_date_returns_bad_request() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2010-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Invalid start date. Date must be between 2015-01-01 and 2017-08-23"
    );
}

#[tokio::test]
async fn test_malformed_date_returns_bad_request() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/not-a-date").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().starts_with("Invalid start date"));
}

#[tokio::test]
async fn test_invalid_end_date_returns_bad_request() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2016-01-01/2018-01-01").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Invalid end date. Date must be between 2015-01-01 and 2017-08-23"
    );
}

#[tokio::test]
async fn test_reversed_range_returns_bad_request() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2017-08-23/2017-01-15").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["error"],
        "Invalid date range. Start date must be before end date."
    );
}

#[tokio::test]
async fn test_empty_range_returns_server_error() {
    let app = create_test_app(true).await;

    let (status, json) = get_json(app, "/api/v1.0/2015-06-01/2015-12-31").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(json["error"].as_str().unwrap().contains("2015-06-01"));
}

#[tokio::test]
async fn test_empty_store_returns_server_error() {
    for uri in [
        "/api/v1.0/precipitation",
        "/api/v1.0/stations",
        "/api/v1.0/tobs",
        "/api/v1.0/2017-01-01",
    ] {
        let app = create_test_app(false).await;

        let (status, json) = get_json(app, uri).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "uri {uri}");
        assert_eq!(json["error"], "No measurement data available");
    }
}
