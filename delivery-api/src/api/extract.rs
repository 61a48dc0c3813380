//! リクエスト抽出器
//!
//! axum標準のJSON・パス抽出の失敗を`ServiceError::Validation`に変換し、
//! すべてのクライアントエラーを同じレスポンス形式に揃える。

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use super::error::AppError;
use crate::common::error::{ServiceError, ValidationErrors};

/// JSONボディ抽出器
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(json_rejection_to_error(rejection).into()),
        }
    }
}

fn json_rejection_to_error(rejection: JsonRejection) -> ServiceError {
    ServiceError::Validation(ValidationErrors::single("body", rejection.body_text()))
}

/// パスパラメータ抽出器
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(ApiPath(value)),
            Err(rejection) => Err(ServiceError::Validation(ValidationErrors::single(
                "path",
                rejection.body_text(),
            ))
            .into()),
        }
    }
}
