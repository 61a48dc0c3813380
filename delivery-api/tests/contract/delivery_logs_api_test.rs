//! 配送ログAPI Contract Tests
//!
//! POST /delivery-logs, GET /delivery-logs/{delivery_id}

use axum::http::StatusCode;
use delivery_api::common::auth::UserRole;
use serde_json::json;
use uuid::Uuid;

use crate::support::app::{
    create_delivery, create_test_app, login, seed_actors, seed_user, send, set_status,
};

async fn append_log(app: &axum::Router, token: &str, id: Uuid, text: &str) -> (StatusCode, serde_json::Value) {
    send(
        app,
        "POST",
        "/delivery-logs",
        Some(token),
        Some(json!({ "delivery_id": id, "description": text })),
    )
    .await
}

async fn log_count(pool: &sqlx::SqlitePool, id: Uuid) -> i64 {
    delivery_api::db::delivery_logs::count_by_delivery(pool, id)
        .await
        .unwrap()
}

// ---------------------------------------------------------------------------
// POST /delivery-logs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_append_log_on_shipped_delivery() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;
    set_status(&app, &actors.sale_token, id, "shipped").await;
    let before = log_count(&pool, id).await;

    let (status, body) = append_log(&app, &actors.sale_token, id, "left the warehouse").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, serde_json::Value::Null);
    assert_eq!(log_count(&pool, id).await, before + 1);
}

#[tokio::test]
async fn test_append_log_on_pending_delivery() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;
    set_status(&app, &actors.sale_token, id, "pending").await;
    let before = log_count(&pool, id).await;

    let (status, _) = append_log(&app, &actors.sale_token, id, "awaiting pickup").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(log_count(&pool, id).await, before + 1);
}

#[tokio::test]
async fn test_append_log_on_delivered_delivery_is_rejected() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;
    set_status(&app, &actors.sale_token, id, "delivered").await;
    let before = log_count(&pool, id).await;

    let (status, body) = append_log(&app, &actors.sale_token, id, "too late").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "this order has already been delivered");
    assert_eq!(log_count(&pool, id).await, before);
}

#[tokio::test]
async fn test_append_log_on_processing_delivery_is_rejected() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    let (status, body) = append_log(&app, &actors.sale_token, id, "too early").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "change status to shipped");
    assert_eq!(log_count(&pool, id).await, 0);
}

#[tokio::test]
async fn test_append_log_on_missing_delivery() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let (status, body) = append_log(&app, &actors.sale_token, Uuid::new_v4(), "lost").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "delivery not found");
}

#[tokio::test]
async fn test_customer_cannot_append_log() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;
    set_status(&app, &actors.sale_token, id, "shipped").await;

    let (status, _) = append_log(&app, &actors.customer_token, id, "mine").await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// GET /delivery-logs/{delivery_id}
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_owner_sees_delivery_with_logs_in_order() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;
    set_status(&app, &actors.sale_token, id, "shipped").await;
    append_log(&app, &actors.sale_token, id, "left the warehouse").await;
    append_log(&app, &actors.sale_token, id, "arrived at local hub").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", id),
        Some(&actors.customer_token),
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["user_id"], actors.customer_id.to_string());
    assert_eq!(body["description"], "Mechanical keyboard");
    assert_eq!(body["user"]["name"], "Ana Lima");
    assert!(body["user"].get("password_hash").is_none());

    let descriptions: Vec<_> = body["logs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|log| log["description"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(
        descriptions,
        [
            "status changed to shipped",
            "left the warehouse",
            "arrived at local hub"
        ]
    );
}

#[tokio::test]
async fn test_other_customer_is_forbidden() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    seed_user(&pool, "Bea Costa", "bea@example.com", UserRole::Customer).await;
    let other_token = login(&app, "bea@example.com").await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", id),
        Some(&other_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "the user can only view their deliveries");
}

#[tokio::test]
async fn test_sale_sees_any_delivery() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;
    let id = create_delivery(&app, &actors.sale_token, actors.customer_id).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", id),
        Some(&actors.sale_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["logs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_missing_delivery_is_soft_not_found() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let (status, body) = send(
        &app,
        "GET",
        &format!("/delivery-logs/{}", Uuid::new_v4()),
        Some(&actors.customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "delivery not found" }));
}

#[tokio::test]
async fn test_invalid_delivery_id_is_bad_request() {
    let (app, pool) = create_test_app().await;
    let actors = seed_actors(&app, &pool).await;

    let (status, body) = send(
        &app,
        "GET",
        "/delivery-logs/not-a-uuid",
        Some(&actors.sale_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}
