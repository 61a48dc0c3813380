//! 配送管理API
//!
//! 販売担当向けの配送作成・一覧・ステータス更新

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use super::error::AppError;
use super::extract::{ApiJson, ApiPath};
use super::validation::check_min_trimmed;
use crate::common::delivery::{DeliveryStatus, DeliverySummary};
use crate::common::error::{ServiceError, ValidationErrors};
use crate::delivery_log::DELIVERY_NOT_FOUND_MESSAGE;
use crate::AppState;

/// 配送作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateDeliveryRequest {
    /// 所有者のユーザーID
    pub user_id: Uuid,
    /// 内容
    pub description: String,
}

/// ステータス更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    /// 新しいステータス
    pub status: DeliveryStatus,
}

/// POST /deliveries - 配送作成
///
/// # Returns
/// * `201 Created` - 作成成功（ボディなし）
/// * `404 Not Found` - 所有者が存在しない
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateDeliveryRequest>,
) -> Result<StatusCode, AppError> {
    let mut errors = ValidationErrors::new();
    let description = check_min_trimmed(&mut errors, "description", &request.description, 1);
    errors.into_result()?;

    if state.users.find_by_id(request.user_id).await?.is_none() {
        return Err(ServiceError::NotFound("user not found".to_string()).into());
    }

    let delivery = state
        .deliveries
        .create_delivery(request.user_id, description)
        .await?;
    tracing::info!(delivery_id = %delivery.id, user_id = %delivery.user_id, "Delivery created");

    Ok(StatusCode::CREATED)
}

/// GET /deliveries - 配送一覧（新しい順）
pub async fn index(
    State(state): State<AppState>,
) -> Result<Json<Vec<DeliverySummary>>, AppError> {
    Ok(Json(state.deliveries.list_deliveries().await?))
}

/// PATCH /deliveries/{id}/status - ステータス更新
///
/// 変更内容は配送ログに自動で記録される。
pub async fn update_status(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(request): ApiJson<UpdateStatusRequest>,
) -> Result<StatusCode, AppError> {
    state
        .deliveries
        .update_status(id, request.status)
        .await?
        .ok_or_else(|| ServiceError::NotFound(DELIVERY_NOT_FOUND_MESSAGE.to_string()))?;

    tracing::info!(delivery_id = %id, status = %request.status, "Delivery status updated");
    Ok(StatusCode::OK)
}
