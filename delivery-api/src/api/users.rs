//! ユーザー登録API

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use super::error::AppError;
use super::extract::ApiJson;
use super::validation::{check_email, check_min_trimmed, check_password, MIN_NAME_LEN};
use crate::common::auth::{PublicUser, UserRole};
use crate::common::error::{ServiceError, ValidationErrors};
use crate::db::users::DUPLICATE_EMAIL_MESSAGE;
use crate::AppState;

/// ユーザー登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// 氏名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// パスワード
    pub password: String,
}

/// POST /users - ユーザー登録
///
/// 登録されるユーザーは常に`customer`ロール。
///
/// # Returns
/// * `201 Created` - 作成されたユーザー（パスワード除外）
/// * `400 Bad Request` - 入力不正
/// * `409 Conflict` - メールアドレス重複
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<PublicUser>), AppError> {
    let mut errors = ValidationErrors::new();
    let name = check_min_trimmed(&mut errors, "name", &request.name, MIN_NAME_LEN);
    check_email(&mut errors, &request.email);
    check_password(&mut errors, &request.password);
    errors.into_result()?;

    if state.users.find_by_email(&request.email).await?.is_some() {
        return Err(ServiceError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string()).into());
    }

    let password_hash =
        crate::auth::password::hash_password_blocking(request.password, state.auth.bcrypt_cost)
            .await?;

    let user = state
        .users
        .create_user(name, &request.email, &password_hash, UserRole::Customer)
        .await?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.into())))
}
