//! Account auth endpoint tests against the mock identity provider

mod common;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use common::{body_json, error_code, post_json, TestApp, SEED_EMAIL, SEED_PASSWORD, SEED_SUB};

#[tokio::test]
async fn test_login_returns_token_set() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/login",
            json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(
        body["access_token"].as_str().unwrap(),
        format!("mock-access-{}", SEED_SUB)
    );
    assert!(body["refresh_token"].is_string());
}

#[tokio::test]
async fn test_login_wrong_password_is_401() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/login",
            json!({ "email": SEED_EMAIL, "password": "wrong" }),
        ))
        .await
        .unwrap();

    let code = error_code(response, StatusCode::UNAUTHORIZED).await;
    assert_eq!(code, "AUTHENTICATION_ERROR");
}

#[tokio::test]
async fn test_login_unknown_account_is_401() {
    // Unknown email answers the same as a wrong password
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/login",
            json!({ "email": "nobody@pitchside.test", "password": "whatever" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_signup_rejects_invalid_email() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/signup",
            json!({ "email": "not-an-email", "password": "Secret123!", "username": "player" }),
        ))
        .await
        .unwrap();

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/signup",
            json!({ "email": "new@pitchside.test", "password": "short", "username": "player" }),
        ))
        .await
        .unwrap();

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_confirm_wrong_code_is_400() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/confirm",
            json!({ "email": SEED_EMAIL, "code": "000000" }),
        ))
        .await
        .unwrap();

    let code = error_code(response, StatusCode::BAD_REQUEST).await;
    assert_eq!(code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_refresh_round_trip() {
    let app = TestApp::new();

    let response = app
        .router
        .clone()
        .oneshot(post_json(
            "/v1/auth/login",
            json!({ "email": SEED_EMAIL, "password": SEED_PASSWORD }),
        ))
        .await
        .unwrap();
    let tokens = body_json(response).await;
    let refresh_token = tokens["refresh_token"].as_str().unwrap().to_string();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/refresh",
            json!({ "refresh_token": refresh_token }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["access_token"].as_str().unwrap(),
        format!("mock-access-{}", SEED_SUB)
    );
}

#[tokio::test]
async fn test_invalid_refresh_token_is_401() {
    let app = TestApp::new();

    let response = app
        .router
        .oneshot(post_json(
            "/v1/auth/refresh",
            json!({ "refresh_token": "stolen-token" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
