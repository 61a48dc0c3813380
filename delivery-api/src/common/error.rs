//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! `ServiceError`は`status_code()`と`external_message()`を提供し、
//! APIレイヤーは単一の変換箇所でHTTPレスポンスを生成する。

use axum::http::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Common layer error type
#[derive(Debug, Error)]
pub enum CommonError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// UUID parse error
    #[error("UUID parse error: {0}")]
    UuidParse(#[from] uuid::Error),

    /// Timestamp parse error
    #[error("Timestamp parse error: {0}")]
    TimestampParse(#[from] chrono::ParseError),

    /// Unknown enum value read from storage
    #[error("Unknown value '{value}' for {kind}")]
    UnknownVariant {
        /// 列挙型の名前
        kind: &'static str,
        /// 読み取った値
        value: String,
    },
}

/// フィールド単位のバリデーションエラー
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldIssue {
    /// 対象フィールド名
    pub field: String,
    /// エラーメッセージ
    pub message: String,
}

/// バリデーションエラーの集合
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldIssue>);

impl ValidationErrors {
    /// 空の集合を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 単一フィールドのエラーから作成
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    /// エラーを追加
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.push(FieldIssue {
            field: field.into(),
            message: message.into(),
        });
    }

    /// エラーが1件もないか
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// エラー一覧
    pub fn issues(&self) -> &[FieldIssue] {
        &self.0
    }

    /// エラーがあれば`ServiceError::Validation`に変換する
    pub fn into_result(self) -> Result<(), ServiceError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(self))
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|issue| format!("{}: {}", issue.field, issue.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// delivery service error type
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Request validation error
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict error (duplicate resource, state-incompatible operation)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Authorization error
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// JWT error
    #[error("JWT error: {0}")]
    Jwt(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns a safe error message for external clients.
    ///
    /// Domain errors carry messages meant for the caller and are returned as-is.
    /// Infrastructure errors are reduced to a generic message; the full text
    /// only goes to the server log.
    pub fn external_message(&self) -> String {
        match self {
            Self::Validation(_) => "Validation error".to_string(),
            Self::NotFound(msg)
            | Self::Conflict(msg)
            | Self::Authentication(msg)
            | Self::Authorization(msg) => msg.clone(),
            Self::Common(_) | Self::Database(_) | Self::PasswordHash(_) | Self::Jwt(_) => {
                "Internal server error".to_string()
            }
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::Authorization(_) => StatusCode::FORBIDDEN,
            Self::Common(_)
            | Self::Database(_)
            | Self::PasswordHash(_)
            | Self::Jwt(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// サーバー側の障害か（ログレベル判定用）
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

/// Result type alias (service)
pub type ServiceResult<T> = Result<T, ServiceError>;
