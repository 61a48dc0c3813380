//! テスト用アプリケーション構築とHTTPヘルパー

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use delivery_api::common::auth::UserRole;
use delivery_api::config::AuthConfig;
use delivery_api::AppState;
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

/// テストで共通に使うパスワード
pub const PASSWORD: &str = "secret123";

/// インメモリDBでアプリを構築
pub async fn create_test_app() -> (Router, SqlitePool) {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    delivery_api::db::migrations::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");

    let auth = AuthConfig::new("contract-test-secret", Duration::from_secs(3600)).with_bcrypt_cost(4);
    let app = delivery_api::api::create_app(AppState::from_pool(pool.clone(), auth));
    (app, pool)
}

/// ユーザーを直接DBに作成
pub async fn seed_user(pool: &SqlitePool, name: &str, email: &str, role: UserRole) -> Uuid {
    let hash = delivery_api::auth::password::hash_password(PASSWORD, 4).unwrap();
    delivery_api::db::users::create(pool, name, email, &hash, role)
        .await
        .unwrap()
        .id
}

/// リクエストを送信してステータスとJSONボディを返す（空ボディはNull）
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

/// ログインしてトークンを取得
pub async fn login(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/sessions",
        None,
        Some(json!({ "email": email, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["token"].as_str().unwrap().to_string()
}

/// 販売担当と顧客を作成してそれぞれのトークンを返す
pub struct Actors {
    pub sale_token: String,
    pub customer_id: Uuid,
    pub customer_token: String,
}

pub async fn seed_actors(app: &Router, pool: &SqlitePool) -> Actors {
    seed_user(pool, "Sam Seller", "sam@example.com", UserRole::Sale).await;
    let customer_id = seed_user(pool, "Ana Lima", "ana@example.com", UserRole::Customer).await;
    Actors {
        sale_token: login(app, "sam@example.com").await,
        customer_id,
        customer_token: login(app, "ana@example.com").await,
    }
}

/// 販売担当として配送を作成し、そのIDを返す
pub async fn create_delivery(app: &Router, sale_token: &str, user_id: Uuid) -> Uuid {
    let (status, _) = send(
        app,
        "POST",
        "/deliveries",
        Some(sale_token),
        Some(json!({ "user_id": user_id, "description": "Mechanical keyboard" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, list) = send(app, "GET", "/deliveries", Some(sale_token), None).await;
    list[0]["id"].as_str().unwrap().parse().unwrap()
}

/// 配送ステータスを更新
pub async fn set_status(app: &Router, sale_token: &str, id: Uuid, status: &str) {
    let (code, _) = send(
        app,
        "PATCH",
        &format!("/deliveries/{}/status", id),
        Some(sale_token),
        Some(json!({ "status": status })),
    )
    .await;
    assert_eq!(code, StatusCode::OK);
}
