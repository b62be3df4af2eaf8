//! Blog post models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Blog post
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create / update post request
/// title 与 content 只要求是字符串，空串也接受
#[derive(Debug, Clone, Deserialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
}

/// Public author summary shown in the global listing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthorSummary {
    pub username: String,
    pub email: String,
}

/// Post joined with its author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostWithAuthor {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: AuthorSummary,
}

/// Flat row produced by the posts/users join
#[derive(Debug, sqlx::FromRow)]
pub struct PostWithAuthorRow {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author_username: String,
    pub author_email: String,
}

impl From<PostWithAuthorRow> for PostWithAuthor {
    fn from(row: PostWithAuthorRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            author: AuthorSummary {
                username: row.author_username,
                email: row.author_email,
            },
        }
    }
}

/// Created post response
#[derive(Debug, Serialize)]
pub struct PostCreatedResponse {
    pub msg: &'static str,
    pub id: i64,
}
