//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{response::IntoResponse, Json};
use serde_json::json;

use crate::common::error::ServiceError;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // 内部エラーの詳細はログにのみ出力する
        if self.0.is_server_error() {
            tracing::error!(error = %self.0, "Request failed");
        } else {
            tracing::debug!(error = %self.0, status = status.as_u16(), "Request rejected");
        }

        let mut payload = json!({
            "status": "error",
            "message": self.0.external_message(),
        });
        if let ServiceError::Validation(errors) = &self.0 {
            payload["issues"] = json!(errors);
        }

        (status, Json(payload)).into_response()
    }
}
