//! 文章相关的 HTTP 处理器

use crate::{
    auth::middleware::AuthContext,
    error::AppError,
    extract::{JsonInput, PostId},
    middleware::AppState,
    models::post::*,
};
use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;

/// 创建文章
pub async fn create_blog(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    JsonInput(input): JsonInput<PostInput>,
) -> Result<impl IntoResponse, AppError> {
    let post = state.posts.create(auth_context.user_id, &input).await?;
    tracing::info!(post_id = post.id, author_id = auth_context.user_id, "Blog created");

    Ok(Json(PostCreatedResponse {
        msg: "blog created susccesfully",
        id: post.id,
    }))
}

/// 获取单篇文章（公开）
pub async fn get_blog(
    State(state): State<Arc<AppState>>,
    PostId(id): PostId,
) -> Result<impl IntoResponse, AppError> {
    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found("blog not found"))?;

    Ok(Json(json!({ "msg": post })))
}

/// 更新文章（仅作者）
pub async fn update_blog(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    PostId(id): PostId,
    JsonInput(input): JsonInput<PostInput>,
) -> Result<impl IntoResponse, AppError> {
    state
        .posts
        .update(id, auth_context.user_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("blog not found"))?;

    Ok(Json(json!({ "message": "blog updated" })))
}

/// 删除文章（仅作者）
pub async fn delete_blog(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
    PostId(id): PostId,
) -> Result<impl IntoResponse, AppError> {
    if !state.posts.delete(id, auth_context.user_id).await? {
        return Err(AppError::not_found("blog not found"));
    }

    tracing::info!(post_id = id, author_id = auth_context.user_id, "Blog deleted");
    Ok(Json(json!({ "message": "blog deleted" })))
}

/// 当前用户的文章
pub async fn my_blogs(
    State(state): State<Arc<AppState>>,
    auth_context: AuthContext,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.list_by_author(auth_context.user_id).await?;
    Ok(Json(json!({ "msg": posts })))
}

/// 所有文章及作者信息（公开）
pub async fn list_all_blogs(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let posts = state.posts.list_with_authors().await?;
    Ok(Json(json!({ "msg": posts })))
}
