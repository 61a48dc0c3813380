// 認証関連のデータモデル

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::error::CommonError;

/// ユーザーロール
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// 顧客（自分の配送のみ閲覧可能）
    #[default]
    Customer,
    /// 販売担当（全配送を管理可能）
    Sale,
}

impl UserRole {
    /// DB・JWTで使う文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Customer => "customer",
            UserRole::Sale => "sale",
        }
    }

    /// 所有者以外の配送を閲覧できるロールか
    pub fn can_view_any_delivery(&self) -> bool {
        match self {
            UserRole::Customer => false,
            UserRole::Sale => true,
        }
    }

    /// 保存値からロールを復元する（未設定・未知の値は顧客扱い）
    pub fn from_stored(value: Option<&str>) -> Self {
        value
            .and_then(|raw| raw.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for UserRole {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(UserRole::Customer),
            "sale" => Ok(UserRole::Sale),
            other => Err(CommonError::UnknownVariant {
                kind: "user role",
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// ユーザー
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// ユーザーID
    pub id: Uuid,
    /// 氏名
    pub name: String,
    /// メールアドレス（一意）
    pub email: String,
    /// パスワードハッシュ（bcrypt）
    pub password_hash: String,
    /// ユーザーロール
    pub role: UserRole,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

/// レスポンス用ユーザー（password_hash除外）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PublicUser {
    /// ユーザーID
    pub id: Uuid,
    /// 氏名
    pub name: String,
    /// メールアドレス
    pub email: String,
    /// ロール
    pub role: UserRole,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 更新日時
    pub updated_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        PublicUser {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// JWTクレーム
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// ユーザーID（JWT sub claim）
    pub sub: String,
    /// ユーザーロール
    #[serde(default)]
    pub role: UserRole,
    /// 有効期限（Unix timestamp、JWT exp claim）
    pub exp: usize,
}

/// 認証済みの呼び出し元（ミドルウェアでリクエストに注入）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// ユーザーID
    pub id: Uuid,
    /// ユーザーロール
    pub role: UserRole,
}

impl TryFrom<&Claims> for Caller {
    type Error = CommonError;

    fn try_from(claims: &Claims) -> Result<Self, Self::Error> {
        Ok(Caller {
            id: Uuid::parse_str(&claims.sub)?,
            role: claims.role,
        })
    }
}
