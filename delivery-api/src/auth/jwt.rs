// JWT生成と検証（jsonwebtoken実装）

use crate::common::auth::{Claims, UserRole};
use crate::common::error::ServiceError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;

/// JWTトークンを生成
///
/// # Arguments
/// * `user_id` - ユーザーID（sub）
/// * `role` - ユーザーロール
/// * `secret` - JWTシークレットキー
/// * `expires_in` - 有効期限
///
/// # Returns
/// * `Ok(String)` - JWTトークン（3つのドット区切り部分）
/// * `Err(ServiceError)` - 生成失敗
pub fn create_jwt(
    user_id: &str,
    role: UserRole,
    secret: &str,
    expires_in: Duration,
) -> Result<String, ServiceError> {
    let lifetime = chrono::Duration::from_std(expires_in)
        .map_err(|e| ServiceError::Jwt(format!("Invalid expiration: {}", e)))?;
    let expiration = Utc::now()
        .checked_add_signed(lifetime)
        .ok_or_else(|| ServiceError::Jwt("Failed to calculate expiration time".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        role,
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ServiceError::Jwt(format!("Failed to create JWT: {}", e)))
}

/// JWTトークンを検証
///
/// 署名と有効期限を検証する。失敗は認証エラーとして返す。
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| ServiceError::Authentication(format!("Failed to verify JWT: {}", e)))
}
