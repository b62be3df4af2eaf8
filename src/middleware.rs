//! HTTP 中间件
//! 应用状态与请求追踪

use crate::{
    auth::jwt::JwtService,
    config::AppConfig,
    error::AppError,
    repository::{PostStore, UserStore},
    services::AuthService,
};
use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// 应用状态
///
/// 启动时构建一次，之后只读；存储实现通过 trait 对象注入。
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub users: Arc<dyn UserStore>,
    pub posts: Arc<dyn PostStore>,
    pub jwt_service: Arc<JwtService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
    ) -> Result<Self, AppError> {
        let jwt_service = Arc::new(JwtService::from_config(&config)?);
        let auth_service = Arc::new(AuthService::new(
            users.clone(),
            jwt_service.clone(),
            config.security.clone(),
        ));

        Ok(Self {
            config,
            users,
            posts,
            jwt_service,
            auth_service,
        })
    }
}

/// 请求追踪中间件
/// 为每个请求生成 request_id，并记录日志与指标
pub async fn request_tracking_middleware(req: Request, next: Next) -> Response {
    let request_id = extract_or_generate_request_id(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        let start = Instant::now();

        let mut response = next.run(req).await;

        let elapsed = start.elapsed();
        let status = response.status().as_u16();

        metrics::counter!(
            "http_requests_total",
            "method" => method.as_str().to_string(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!("http_request_duration_seconds").record(elapsed.as_secs_f64());

        tracing::info!(status, elapsed_ms = elapsed.as_millis() as u64, "Request completed");

        if let Ok(value) = HeaderValue::from_str(&request_id) {
            response.headers_mut().insert("x-request-id", value);
        }

        response
    }
    .instrument(span)
    .await
}

/// 从请求头中提取或生成 request_id
fn extract_or_generate_request_id(headers: &HeaderMap) -> String {
    headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty() && s.len() <= 128)
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
