mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{read_json, send, spawn_app};

#[tokio::test]
async fn health_check_returns_200() {
    let app = spawn_app().await;

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "identity-service-test");
    assert_eq!(body["checks"]["database"], "up");
}
