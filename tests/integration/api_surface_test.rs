//! Routing and auth boundary tests
//!
//! Every route except `/health` and `/v1/auth/*` must reject requests
//! without a valid bearer token before any handler logic runs.

mod common;

use axum::http::StatusCode;
use http_body_util::BodyExt;
use tower::ServiceExt;

use common::{error_code, get, get_with_token, TestApp};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new();

    let response = app.router.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_protected_routes_reject_missing_token() {
    let protected = [
        "/v1/account",
        "/v1/friends",
        "/v1/friends/requests",
        "/v1/teams",
        "/v1/venues",
    ];

    for uri in protected {
        let app = TestApp::new();
        let response = app.router.oneshot(get(uri)).await.unwrap();
        let code = error_code(response, StatusCode::UNAUTHORIZED).await;
        assert_eq!(code, "missing_authorization", "route {}", uri);
    }
}

#[tokio::test]
async fn test_malformed_bearer_token_rejected() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(get_with_token("/v1/teams", "not-a-jwt"))
        .await
        .unwrap();

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "invalid_token");
}

#[tokio::test]
async fn test_wrong_scheme_rejected() {
    let app = TestApp::new();

    let request = axum::http::Request::builder()
        .method("GET")
        .uri("/v1/account")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();
    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "invalid_authorization_format");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new();

    let response = app.router.oneshot(get("/v1/nope")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
