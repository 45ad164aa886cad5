//! Integration tests for the standalone API router

use axum::body::{Body, to_bytes};
use chrono::Utc;
use http::{Method, Request, StatusCode};
use mranv_api::build_router;
use mranv_core::TimestampResponse;
use pretty_assertions::assert_eq;
use tower::ServiceExt;

async fn get(uri: &str) -> (StatusCode, serde_json::Value) {
    let response = build_router()
        .unwrap()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_example_returns_parseable_recent_time() {
    let (status, body) = get("/api/mranv/example").await;
    assert_eq!(status, StatusCode::OK);

    let response: TimestampResponse = serde_json::from_value(body).unwrap();
    let time = response.parse().unwrap();
    let skew = (Utc::now() - time).num_seconds().abs();
    assert!(skew < 5, "server time is {skew}s away from now");
}

#[tokio::test]
async fn test_example_has_only_time_field() {
    let (_, body) = get("/api/mranv/example").await;
    let object = body.as_object().unwrap();
    assert_eq!(object.keys().collect::<Vec<_>>(), vec!["time"]);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert!(body["uptime_seconds"].is_u64());
}

#[tokio::test]
async fn test_unknown_route_returns_json_404() {
    let (status, body) = get("/api/mranv/does-not-exist").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "ROUTE_NOT_FOUND");
}

#[tokio::test]
async fn test_example_rejects_post() {
    let response = build_router()
        .unwrap()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/mranv/example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}
