//! ユーザー登録API Contract Tests
//!
//! POST /users

use axum::http::StatusCode;
use serde_json::json;

use crate::support::app::{create_test_app, send};

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let (app, _pool) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": "Ana Lima", "email": "ana@example.com", "password": "secret123" })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["name"], "Ana Lima");
    assert_eq!(body["email"], "ana@example.com");
    assert_eq!(body["role"], "customer");
    assert!(body["id"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email_is_conflict() {
    let (app, _pool) = create_test_app().await;
    let payload = json!({ "name": "Ana Lima", "email": "ana@example.com", "password": "secret123" });

    let (first, _) = send(&app, "POST", "/users", None, Some(payload.clone())).await;
    assert_eq!(first, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/users", None, Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "User with same email already exists");
}

#[tokio::test]
async fn test_register_validation_errors() {
    let (app, _pool) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": "A", "email": "nope", "password": "123" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Validation error");
    assert_eq!(body["issues"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_register_missing_field_is_bad_request() {
    let (app, _pool) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({ "name": "Ana Lima", "email": "ana@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["issues"][0]["field"], "body");
}

#[tokio::test]
async fn test_register_ignores_requested_role() {
    let (app, _pool) = create_test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        None,
        Some(json!({
            "name": "Eve",
            "email": "eve@example.com",
            "password": "secret123",
            "role": "sale"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["role"], "customer");
}
