//! PostgreSQL 连接池
//! 启动时建立一次并执行迁移，之后通过 AppState 交给存储实现共享

use crate::{config::DatabaseConfig, error::AppError};
use secrecy::ExposeSecret;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .test_before_acquire(true)
}

/// 连接数据库；失败时服务不应启动
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let pool = pool_options(config)
        .connect(config.url.expose_secret())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Cannot reach the blog database");
            AppError::Database(e)
        })?;

    tracing::info!(
        max = config.max_connections,
        min = config.min_connections,
        "Blog database connected"
    );

    Ok(pool)
}

/// 建立 users / posts 表
pub async fn migrate(pool: &PgPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await.map_err(|e| {
        tracing::error!(error = %e, "Schema migration failed");
        AppError::Database(e.into())
    })?;

    tracing::info!("Blog schema is up to date");
    Ok(())
}
