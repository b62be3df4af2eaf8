//! 用户相关的 HTTP 处理器
//!
//! `/user/*` 下的错误响应体使用 `msg` 字段；`/blog/v1/user` 沿用 `message`。

use crate::{
    auth::middleware::AuthContext,
    error::{AppError, UserRouteError},
    extract::JsonInput,
    middleware::AppState,
    models::user::*,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

// 请求体无法解析时与字段校验失败同样处理
fn credentials<T>(payload: Result<JsonInput<T>, AppError>) -> Result<T, UserRouteError> {
    payload
        .map(|JsonInput(req)| req)
        .map_err(|_| UserRouteError(AppError::InvalidCredentials))
}

/// 注册
pub async fn signup(
    State(state): State<Arc<AppState>>,
    payload: Result<JsonInput<SignupRequest>, AppError>,
) -> Result<impl IntoResponse, UserRouteError> {
    let req = credentials(payload)?;
    let response = state.auth_service.signup(req).await?;
    Ok(Json(response))
}

/// 登录
pub async fn signin(
    State(state): State<Arc<AppState>>,
    payload: Result<JsonInput<SigninRequest>, AppError>,
) -> Result<impl IntoResponse, UserRouteError> {
    let req = credentials(payload)?;
    let response = state.auth_service.signin(req).await?;
    Ok(Json(response))
}

/// 列出所有用户（公开）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, UserRouteError> {
    let users: Vec<UserResponse> = state
        .users
        .list()
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();

    Ok(Json(json!({ "msg": users })))
}

/// 获取当前用户信息
pub async fn get_current_user(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .users
        .find_by_id(auth_context.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    Ok(Json(json!({ "msg": UserResponse::from(user) })))
}
