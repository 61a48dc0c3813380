//! 配送ログAPI

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::error::AppError;
use super::extract::{ApiJson, ApiPath};
use super::validation::check_min_trimmed;
use crate::common::auth::Caller;
use crate::common::error::ValidationErrors;
use crate::delivery_log::DELIVERY_NOT_FOUND_MESSAGE;
use crate::AppState;

/// 配送ログ作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateDeliveryLogRequest {
    /// 配送ID
    pub delivery_id: Uuid,
    /// 記録内容
    pub description: String,
}

/// POST /delivery-logs - 配送ログ追記
///
/// # Returns
/// * `201 Created` - 追記成功（ボディなし）
/// * `404 Not Found` - 配送が存在しない
/// * `409 Conflict` - 配達完了済み、または未発送
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDeliveryLogRequest>,
) -> Result<StatusCode, AppError> {
    let mut errors = ValidationErrors::new();
    let description = check_min_trimmed(&mut errors, "description", &request.description, 1);
    errors.into_result()?;

    state
        .delivery_log_manager()
        .create_log(request.delivery_id, description)
        .await?;

    Ok(StatusCode::CREATED)
}

/// GET /delivery-logs/{delivery_id} - 配送詳細とログ取得
///
/// 配送が存在しない場合はエラーではなく`{"message": ...}`を404で返す。
///
/// # Returns
/// * `200 OK` - 配送・所有者・ログ
/// * `403 Forbidden` - 顧客が他人の配送を参照
/// * `404 Not Found` - 配送が存在しない
pub async fn show(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    ApiPath(delivery_id): ApiPath<Uuid>,
) -> Result<Response, AppError> {
    let details = state
        .delivery_log_manager()
        .show(&caller, delivery_id)
        .await?;

    Ok(match details {
        Some(details) => Json(details).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "message": DELIVERY_NOT_FOUND_MESSAGE })),
        )
            .into_response(),
    })
}
