//! 认证守卫中间件

use crate::{auth::jwt::JwtService, error::AppError};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// 认证上下文（由守卫写入请求扩展）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
}

// 在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .copied()
            .ok_or(AppError::Unauthorized)
    }
}

/// 从 Authorization 头提取令牌
///
/// 头缺失或格式不是 `Bearer <token>` 时返回空字符串。
pub fn extract_token(headers: &HeaderMap) -> String {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

/// 认证守卫
///
/// 只有令牌验证通过时才调用 `next`；验证失败返回 403，内部故障返回 500。
pub async fn require_auth(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(req.headers());

    let claims = jwt_service.verify(&token)?;
    let user_id = claims.user_id()?;

    tracing::debug!(user_id, "Request authenticated");
    req.extensions_mut().insert(AuthContext { user_id });

    Ok(next.run(req).await)
}
