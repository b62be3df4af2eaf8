//! 请求输入解析
//! 把 JSON 与路径参数的解析失败统一转换为输入校验错误（411）

use crate::error::AppError;
use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

/// JSON 请求体，解析失败时返回 `AppError::Validation`
#[derive(Debug, Clone)]
pub struct JsonInput<T>(pub T);

impl<S, T> FromRequest<S> for JsonInput<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            AppError::validation("Invalid Inputs")
        })?;

        Ok(Self(value))
    }
}

/// 路径中的文章 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(pub i64);

impl<S> FromRequestParts<S> for PostId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<i64>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected post id");
                AppError::validation("Invalid Inputs")
            })?;

        Ok(Self(id))
    }
}
