// パスワードハッシュ化と検証（bcrypt実装）

use crate::common::error::ServiceError;
use bcrypt::{hash, verify};

/// パスワードをbcryptでハッシュ化
///
/// # Arguments
/// * `password` - ハッシュ化するパスワード
/// * `cost` - bcryptコスト（4〜31）
///
/// # Returns
/// * `Ok(String)` - bcryptハッシュ文字列（$2b$で始まる）
/// * `Err(ServiceError)` - ハッシュ化失敗
pub fn hash_password(password: &str, cost: u32) -> Result<String, ServiceError> {
    hash(password, cost)
        .map_err(|e| ServiceError::PasswordHash(format!("Failed to hash password: {}", e)))
}

/// パスワードを検証
///
/// # Returns
/// * `Ok(true)` - パスワード一致
/// * `Ok(false)` - パスワード不一致
/// * `Err(ServiceError)` - 検証失敗（ハッシュ形式不正など）
pub fn verify_password(password: &str, hash: &str) -> Result<bool, ServiceError> {
    verify(password, hash)
        .map_err(|e| ServiceError::PasswordHash(format!("Failed to verify password: {}", e)))
}

/// bcryptのハッシュ処理をブロッキングスレッドで実行
///
/// bcryptはCPUバウンドなので非同期ランタイムのワーカーを塞がないようにする。
pub async fn hash_password_blocking(password: String, cost: u32) -> Result<String, ServiceError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password hashing task failed: {}", e)))?
}

/// bcryptの検証処理をブロッキングスレッドで実行
pub async fn verify_password_blocking(password: String, hash: String) -> Result<bool, ServiceError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &hash))
        .await
        .map_err(|e| ServiceError::Internal(format!("Password verification task failed: {}", e)))?
}
