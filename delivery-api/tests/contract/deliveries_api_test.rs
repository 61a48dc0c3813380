//! 配送管理API Contract Tests
//!
//! POST /deliveries, GET /deliveries, PATCH /deliveries/{id}/status

use axum::http::StatusCode;
use serde_json::json;
use uuid::Uuid;

use crate::support::app::{create_delivery, create_test_app, seed_actors, send, set_status};

#[tokio::test]
async fn test_create_and_list_deliveries() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    let (status, list) = send(&app, "GET", "/deliveries", Some(&actors.sale_token), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["id"], id.to_string());
    assert_eq!(list[0]["status"], "processing");
    assert_eq!(list[0]["user"]["name"], "Ana Lima");
    assert_eq!(list[0]["user"]["email"], "ana@example.com");
}

#[tokio::test]
async fn test_create_delivery_for_unknown_user() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let (status, body) = send(
        &app,
        "POST",
        "/deliveries",
        Some(&actors.sale_token),
        Some(json!({ "user_id": Uuid::new_v4(), "description": "Monitor" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
async fn test_status_update_appends_one_log() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    set_status(&app, &actors.sale_token, id, "shipped").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", id),
        Some(&actors.sale_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "shipped");
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["description"], "status changed to shipped");
}

#[tokio::test]
async fn test_status_change_log_bypasses_append_gate() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    set_status(&app, &actors.sale_token, id, "delivered").await;

    let (status, _) = send(
        &app,
        "POST",
        "/delivery-logs",
        Some(&actors.sale_token),
        Some(json!({ "delivery_id": id, "description": "manual note" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", id),
        Some(&actors.sale_token),
        None,
    )
    .await;
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0]["description"], "status changed to delivered");
}

#[tokio::test]
async fn test_status_update_rejects_unknown_status_and_missing_delivery() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/deliveries/{}/status", id),
        Some(&actors.sale_token),
        Some(json!({ "status": "lost" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        "PATCH",
        &format!("/deliveries/{}/status", Uuid::new_v4()),
        Some(&actors.sale_token),
        Some(json!({ "status": "delivered" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "delivery not found");
}

#[tokio::test]
async fn test_delivery_routes_require_sale_role() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let (status, body) = send(&app, "GET", "/deliveries", Some(&actors.customer_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Unauthorized");

    let (status, body) = send(&app, "GET", "/deliveries", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "JWT token not found");

    let (status, body) = send(&app, "GET", "/deliveries", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid JWT token");
}
