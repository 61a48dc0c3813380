//! セッションAPI
//!
//! メールアドレスとパスワードで認証し、JWTを発行する

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use super::error::AppError;
use super::extract::ApiJson;
use super::validation::{check_email, check_password};
use crate::common::auth::PublicUser;
use crate::common::error::{ServiceError, ValidationErrors};
use crate::AppState;

/// 認証失敗時のメッセージ（ユーザー不在とパスワード不一致で共通）
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    /// メールアドレス
    pub email: String,
    /// パスワード
    pub password: String,
}

/// ログインレスポンス
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    /// JWTトークン
    pub token: String,
    /// ユーザー情報
    pub user: PublicUser,
}

/// POST /sessions - ログイン
///
/// # Returns
/// * `200 OK` - `{token, user}`
/// * `400 Bad Request` - 入力不正
/// * `401 Unauthorized` - 認証失敗
pub async fn create(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateSessionRequest>,
) -> Result<Json<SessionResponse>, AppError> {
    let mut errors = ValidationErrors::new();
    check_email(&mut errors, &request.email);
    check_password(&mut errors, &request.password);
    errors.into_result()?;

    let invalid_credentials = || ServiceError::Authentication(INVALID_CREDENTIALS_MESSAGE.to_string());

    let user = state
        .users
        .find_by_email(&request.email)
        .await?
        .ok_or_else(invalid_credentials)?;

    let matched = crate::auth::password::verify_password_blocking(
        request.password,
        user.password_hash.clone(),
    )
    .await?;
    if !matched {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(invalid_credentials().into());
    }

    let token = crate::auth::jwt::create_jwt(
        &user.id.to_string(),
        user.role,
        &state.auth.jwt_secret,
        state.auth.jwt_expires_in,
    )?;

    tracing::info!(user_id = %user.id, role = %user.role, "Session created");
    Ok(Json(SessionResponse {
        token,
        user: user.into(),
    }))
}
