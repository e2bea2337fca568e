//! Post Repository Implementation
//!
//! PostgreSQL implementation of the PostRepository trait. Read-only in
//! this scope.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{DiscussPost, PostRepository};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    status: i16,
    created_at: DateTime<Utc>,
    comment_count: i32,
}

impl PostRow {
    fn into_post(self) -> DiscussPost {
        DiscussPost {
            id: self.id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            status: self.status,
            created_at: self.created_at,
            comment_count: self.comment_count,
        }
    }
}

/// PostgreSQL post repository implementation.
#[derive(Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for PgPostRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<DiscussPost>, AppError> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT id, user_id, title, content, status, created_at, comment_count
            FROM discuss_posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }
}

#[cfg(test)]
mod tests {
    // Integration tests would go here, requiring a test database
}
