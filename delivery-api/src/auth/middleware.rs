// 認証・認可ミドルウェア

use crate::api::error::AppError;
use crate::common::auth::{Caller, UserRole};
use crate::common::error::ServiceError;
use crate::config::AuthConfig;
use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

/// 販売担当のみ
pub const SALE_ONLY: &[UserRole] = &[UserRole::Sale];

/// 認証済みの全ロール
pub const ANY_ROLE: &[UserRole] = &[UserRole::Sale, UserRole::Customer];

const TOKEN_NOT_FOUND_MESSAGE: &str = "JWT token not found";
const INVALID_TOKEN_MESSAGE: &str = "Invalid JWT token";
const UNAUTHORIZED_ROLE_MESSAGE: &str = "Unauthorized";

/// JWT認証ミドルウェア
///
/// Authorizationヘッダーから "Bearer {token}" を抽出してJWT検証を行う
///
/// # Arguments
/// * `State(auth)` - JWT署名検証用の認証設定
/// * `request` - HTTPリクエスト
/// * `next` - 次のミドルウェア/ハンドラー
///
/// # Returns
/// * `Ok(Response)` - 認証成功、requestにCallerを追加
/// * `Err(AppError)` - 認証失敗、401 Unauthorized
pub async fn jwt_auth_middleware(
    State(auth): State<AuthConfig>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ServiceError::Authentication(TOKEN_NOT_FOUND_MESSAGE.to_string()))?;

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| ServiceError::Authentication(INVALID_TOKEN_MESSAGE.to_string()))?;

    let claims = crate::auth::jwt::verify_jwt(token, &auth.jwt_secret).map_err(|e| {
        tracing::warn!("JWT verification failed: {}", e);
        ServiceError::Authentication(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    let caller = Caller::try_from(&claims).map_err(|e| {
        tracing::warn!("JWT subject is not a user id: {}", e);
        ServiceError::Authentication(INVALID_TOKEN_MESSAGE.to_string())
    })?;

    // 呼び出し元をrequestの拡張データに格納
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// ロール認可ミドルウェア
///
/// `jwt_auth_middleware`の内側で使用する。呼び出し元のロールが
/// 許可リストに含まれない場合は403を返す。
pub async fn require_roles(
    State(allowed): State<&'static [UserRole]>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let caller = request
        .extensions()
        .get::<Caller>()
        .ok_or_else(|| ServiceError::Authentication(TOKEN_NOT_FOUND_MESSAGE.to_string()))?;

    if !allowed.contains(&caller.role) {
        tracing::debug!(user_id = %caller.id, role = %caller.role, "Role not permitted");
        return Err(ServiceError::Authorization(UNAUTHORIZED_ROLE_MESSAGE.to_string()).into());
    }

    Ok(next.run(request).await)
}
