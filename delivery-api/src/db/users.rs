// ユーザーCRUD操作

use crate::common::auth::{User, UserRole};
use crate::common::error::{CommonError, ServiceError};
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use super::{format_timestamp, is_unique_violation, parse_timestamp};

/// メールアドレス重複時のメッセージ
pub const DUPLICATE_EMAIL_MESSAGE: &str = "User with same email already exists";

/// ユーザーを作成
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `name` - 氏名
/// * `email` - メールアドレス
/// * `password_hash` - bcryptハッシュ化されたパスワード
/// * `role` - ユーザーロール
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(ServiceError::Conflict)` - メールアドレス重複
/// * `Err(ServiceError)` - その他の作成失敗
pub async fn create(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password_hash: &str,
    role: UserRole,
) -> Result<User, ServiceError> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(role.as_str())
    .bind(format_timestamp(now))
    .bind(format_timestamp(now))
    .execute(pool)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            ServiceError::Conflict(DUPLICATE_EMAIL_MESSAGE.to_string())
        } else {
            ServiceError::Database(format!("Failed to create user: {}", e))
        }
    })?;

    Ok(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        password_hash: password_hash.to_string(),
        role,
        created_at: now,
        updated_at: now,
    })
}

/// メールアドレスでユーザーを検索
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(ServiceError)` - 検索失敗
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, ServiceError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, password_hash, role, created_at, updated_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose().map_err(Into::into)
}

/// IDでユーザーを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, ServiceError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, name, email, password_hash, role, created_at, updated_at FROM users WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| ServiceError::Database(format!("Failed to find user: {}", e)))?;

    row.map(UserRow::into_user).transpose().map_err(Into::into)
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserRow {
    pub(crate) id: String,
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) password_hash: String,
    pub(crate) role: Option<String>,
    pub(crate) created_at: String,
    pub(crate) updated_at: String,
}

impl UserRow {
    pub(crate) fn into_user(self) -> Result<User, CommonError> {
        Ok(User {
            id: Uuid::parse_str(&self.id)?,
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            role: UserRole::from_stored(self.role.as_deref()),
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
