//! User repository (数据库访问层)

use crate::{error::AppError, models::user::*};
use async_trait::async_trait;
use sqlx::PgPool;

/// 存储可用性，供就绪探针使用
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self, HealthStatus::Healthy)
    }
}

/// 用户存储接口
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// 邮箱重复时返回 `AppError::EmailTaken`
    async fn create(&self, new_user: &NewUser) -> Result<User, AppError>;

    async fn list(&self) -> Result<Vec<User>, AppError>;

    async fn health_check(&self) -> HealthStatus {
        HealthStatus::Healthy
    }
}

pub struct UserRepository {
    db: PgPool,
}

impl UserRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        Ok(user)
    }

    async fn create(&self, new_user: &NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, email, password_hash, created_at
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            // 并发注册同一邮箱时由唯一约束兜底
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::EmailTaken
            }
            other => AppError::Database(other),
        })
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, username, email, password_hash, created_at FROM users ORDER BY id",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(users)
    }

    async fn health_check(&self) -> HealthStatus {
        match sqlx::query("SELECT 1 FROM users LIMIT 1").fetch_optional(&self.db).await {
            Ok(_) => HealthStatus::Healthy,
            Err(e) => {
                tracing::warn!(error = %e, "User store is not reachable");
                HealthStatus::Unhealthy(e.to_string())
            }
        }
    }
}
