//! Configuration management via environment variables
//!
//! Provides helper functions for reading environment variables with fallback
//! to legacy variable names with warning logs, and the typed configuration
//! structs built from them.

use std::time::Duration;

/// デフォルトのJWT有効期限（1日）
pub const DEFAULT_JWT_EXPIRES_IN_SECS: u64 = 86_400;

/// デフォルトのbcryptコスト
pub const DEFAULT_BCRYPT_COST: u32 = 8;

/// デフォルトのデータベースURL
pub const DEFAULT_DATABASE_URL: &str = "sqlite:data/delivery-api.db";

/// Get an environment variable with fallback to a legacy name
///
/// If the new variable name is set, returns its value.
/// If only the legacy variable name is set, returns its value
/// and logs a deprecation warning.
///
/// # Example
/// ```
/// use delivery_api::config::get_env_with_fallback;
///
/// let port = get_env_with_fallback("DELIVERY_API_PORT", "PORT");
/// ```
pub fn get_env_with_fallback(new_name: &str, old_name: &str) -> Option<String> {
    if let Ok(val) = std::env::var(new_name) {
        return Some(val);
    }
    if let Ok(val) = std::env::var(old_name) {
        tracing::warn!(
            "Environment variable '{}' is deprecated, use '{}' instead",
            old_name,
            new_name
        );
        return Some(val);
    }
    None
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(new_name: &str, old_name: &str, default: &str) -> String {
    get_env_with_fallback(new_name, old_name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable with fallback, parsing to a specific type
///
/// Returns `default` if neither variable is set or parsing fails.
pub fn get_env_with_fallback_parse<T: std::str::FromStr>(
    new_name: &str,
    old_name: &str,
    default: T,
) -> T {
    get_env_with_fallback(new_name, old_name)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// 認証設定（JWT署名鍵・有効期限・bcryptコスト）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// JWT署名鍵
    pub jwt_secret: String,
    /// JWT有効期限
    pub jwt_expires_in: Duration,
    /// bcryptコスト
    pub bcrypt_cost: u32,
}

impl AuthConfig {
    /// 明示的な値から作成
    pub fn new(jwt_secret: impl Into<String>, jwt_expires_in: Duration) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            jwt_expires_in,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
        }
    }

    /// 環境変数から読み込む
    ///
    /// `DELIVERY_API_JWT_SECRET`（旧: `JWT_SECRET`）が未設定の場合は
    /// プロセスごとにランダムな鍵を生成する（再起動でトークンは無効になる）。
    pub fn from_env() -> Self {
        let jwt_secret = match get_env_with_fallback("DELIVERY_API_JWT_SECRET", "JWT_SECRET") {
            Some(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!(
                    "DELIVERY_API_JWT_SECRET is not set; using a random secret for this process"
                );
                crate::auth::generate_random_token(64)
            }
        };
        let expires_secs = get_env_with_fallback_parse(
            "DELIVERY_API_JWT_EXPIRES_IN_SECS",
            "JWT_EXPIRES_IN_SECS",
            DEFAULT_JWT_EXPIRES_IN_SECS,
        );

        Self {
            jwt_secret,
            jwt_expires_in: Duration::from_secs(expires_secs),
            bcrypt_cost: get_bcrypt_cost(),
        }
    }

    /// bcryptコストを変更する
    pub fn with_bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = cost;
        self
    }
}

/// bcryptコストを取得
///
/// 環境変数 `DELIVERY_API_BCRYPT_COST`（旧: `BCRYPT_COST`）から取得し、
/// 未設定または不正な値の場合は8を返す。
pub fn get_bcrypt_cost() -> u32 {
    get_env_with_fallback_parse("DELIVERY_API_BCRYPT_COST", "BCRYPT_COST", DEFAULT_BCRYPT_COST)
}

/// データベースURLを取得
///
/// 環境変数 `DELIVERY_API_DATABASE_URL`（旧: `DATABASE_URL`）から取得し、
/// 未設定の場合は `sqlite:data/delivery-api.db` を返す。
pub fn get_database_url() -> String {
    get_env_with_fallback_or(
        "DELIVERY_API_DATABASE_URL",
        "DATABASE_URL",
        DEFAULT_DATABASE_URL,
    )
}
