//! REST APIハンドラー
//!
//! ユーザー登録、セッション、配送、配送ログ

/// 配送管理API
pub mod deliveries;
/// 配送ログAPI
pub mod delivery_logs;
/// エラーレスポンス
pub mod error;
/// リクエスト抽出器
pub mod extract;
/// セッションAPI
pub mod sessions;
/// ユーザー登録API
pub mod users;
/// 入力検証
pub mod validation;

use crate::auth::middleware::{jwt_auth_middleware, require_roles, ANY_ROLE, SALE_ONLY};
use crate::common::auth::UserRole;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/users", post(users::create))
        .route("/sessions", post(sessions::create))
        .route("/health", get(health));

    let sale_routes = protected(
        Router::new()
            .route("/deliveries", post(deliveries::create).get(deliveries::index))
            .route("/deliveries/{id}/status", patch(deliveries::update_status))
            .route("/delivery-logs", post(delivery_logs::create)),
        &state,
        SALE_ONLY,
    );

    let member_routes = protected(
        Router::new().route("/delivery-logs/{delivery_id}", get(delivery_logs::show)),
        &state,
        ANY_ROLE,
    );

    Router::new()
        .merge(public_routes)
        .merge(sale_routes)
        .merge(member_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JWT認証とロール認可をルート群に適用する
fn protected(
    routes: Router<AppState>,
    state: &AppState,
    roles: &'static [UserRole],
) -> Router<AppState> {
    routes
        .route_layer(middleware::from_fn_with_state(roles, require_roles))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            jwt_auth_middleware,
        ))
}

/// GET /health - ヘルスチェック
async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}
