//! 路由注册
//! 创建所有 API 路由并应用中间件

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{auth::middleware::require_auth, handlers, middleware::AppState};

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    // 认证守卫：逐路由挂载，公开与受保护的方法可共用同一路径
    let guard = from_fn_with_state(state.jwt_service.clone(), require_auth);

    // 公开端点（健康检查）
    let health_routes = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check));

    let user_routes = Router::new()
        .route("/signup", post(handlers::user::signup))
        .route("/signin", post(handlers::user::signin))
        .route("/all", get(handlers::user::list_users));

    let blog_routes = Router::new()
        .route("/getAll", get(handlers::blog::list_all_blogs))
        .route(
            "/v1/user",
            get(handlers::user::get_current_user).route_layer(guard.clone()),
        )
        .route(
            "/v1/blog",
            post(handlers::blog::create_blog).route_layer(guard.clone()),
        )
        .route(
            "/v1/blog/{id}",
            get(handlers::blog::get_blog).merge(
                put(handlers::blog::update_blog)
                    .delete(handlers::blog::delete_blog)
                    .route_layer(guard.clone()),
            ),
        )
        .route(
            "/v1/my-blogs",
            get(handlers::blog::my_blogs).route_layer(guard),
        );

    Router::new()
        .merge(health_routes)
        .nest("/user", user_routes)
        .nest("/blog", blog_routes)
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
