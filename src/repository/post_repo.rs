//! Post repository (数据库访问层)

use crate::{error::AppError, models::post::*};
use async_trait::async_trait;
use sqlx::PgPool;

/// 文章存储接口
///
/// 更新与删除按作者限定范围，非作者视为不存在。
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create(&self, author_id: i64, input: &PostInput) -> Result<Post, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError>;

    async fn update(
        &self,
        id: i64,
        author_id: i64,
        input: &PostInput,
    ) -> Result<Option<Post>, AppError>;

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError>;

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>, AppError>;

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, AppError>;
}

pub struct PostRepository {
    db: PgPool,
}

impl PostRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    async fn create(&self, author_id: i64, input: &PostInput) -> Result<Post, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, author_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&input.title)
        .bind(&input.content)
        .bind(author_id)
        .fetch_one(&self.db)
        .await?;

        Ok(post)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db)
            .await?;

        Ok(post)
    }

    async fn update(
        &self,
        id: i64,
        author_id: i64,
        input: &PostInput,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET
                title = $3,
                content = $4,
                updated_at = NOW()
            WHERE id = $1 AND author_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(author_id)
        .bind(&input.title)
        .bind(&input.content)
        .fetch_optional(&self.db)
        .await?;

        Ok(post)
    }

    async fn delete(&self, id: i64, author_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1 AND author_id = $2")
            .bind(id)
            .bind(author_id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_by_author(&self, author_id: i64) -> Result<Vec<Post>, AppError> {
        let posts =
            sqlx::query_as::<_, Post>("SELECT * FROM posts WHERE author_id = $1 ORDER BY id")
                .bind(author_id)
                .fetch_all(&self.db)
                .await?;

        Ok(posts)
    }

    async fn list_with_authors(&self) -> Result<Vec<PostWithAuthor>, AppError> {
        let rows = sqlx::query_as::<_, PostWithAuthorRow>(
            r#"
            SELECT
                p.id,
                p.title,
                p.content,
                u.username AS author_username,
                u.email AS author_email
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(PostWithAuthor::from).collect())
    }
}
