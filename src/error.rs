//! 统一错误模型
//! 定义所有错误类型和错误响应格式

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误类型
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// 令牌缺失、无效或过期
    #[error("Authentication failed")]
    Unauthorized,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    /// 获取 HTTP 状态码
    ///
    /// 输入错误与查找失败共用 411，与现有客户端保持一致。
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InvalidCredentials
            | AppError::EmailTaken
            | AppError::NotFound(_)
            | AppError::Validation(_) => StatusCode::LENGTH_REQUIRED,
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// 获取用户友好的错误消息（不包含敏感信息）
    pub fn user_message(&self) -> String {
        match self {
            AppError::Unauthorized => "You are not logged in".to_string(),
            AppError::InvalidCredentials => "Invalid Credentials".to_string(),
            AppError::EmailTaken => "email already exists".to_string(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Database(_) | AppError::Config(_) | AppError::Internal(_) => {
                "error in server side".to_string()
            }
        }
    }

    /// 获取错误码
    pub fn code(&self) -> u16 {
        self.status_code().as_u16()
    }

    // 便捷方法
    pub fn not_found(msg: &str) -> Self {
        AppError::NotFound(msg.to_string())
    }

    pub fn validation(msg: &str) -> Self {
        AppError::Validation(msg.to_string())
    }

    pub fn internal_error(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }

    fn log(&self) {
        if self.status_code().is_server_error() {
            tracing::error!(code = self.code(), error = %self, "Application error");
        } else {
            tracing::debug!(code = self.code(), error = %self, "Request rejected");
        }
    }
}

/// 错误响应 DTO
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();

        let body = ErrorResponse {
            message: self.user_message(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

/// `/user/*` 路由的错误响应 DTO，字段名为 `msg`
#[derive(Debug, Serialize)]
pub struct MsgErrorResponse {
    pub msg: String,
}

/// `/user/*` 路由使用的错误包装
///
/// 状态码与消息同 `AppError`，只有响应体字段名不同。
#[derive(Debug)]
pub struct UserRouteError(pub AppError);

impl From<AppError> for UserRouteError {
    fn from(e: AppError) -> Self {
        UserRouteError(e)
    }
}

impl IntoResponse for UserRouteError {
    fn into_response(self) -> Response {
        let error = self.0;
        error.log();

        let body = MsgErrorResponse {
            msg: error.user_message(),
        };

        (error.status_code(), Json(body)).into_response()
    }
}

impl From<config::ConfigError> for AppError {
    fn from(e: config::ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}
