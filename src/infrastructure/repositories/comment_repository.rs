//! Comment Repository Implementation
//!
//! PostgreSQL implementation of the CommentRepository trait. The target
//! union is flattened into (entity_kind, entity_id) columns and rebuilt on
//! the way out; an unknown kind tag in the table is a data fault, not a
//! default.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Comment, CommentRepository, CommentStatus, CommentTarget, EntityKind, NewComment};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i64,
    user_id: i64,
    entity_kind: i16,
    entity_id: i64,
    content: String,
    status: i16,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Result<Comment, AppError> {
        let kind = EntityKind::from_i16(self.entity_kind).ok_or_else(|| {
            AppError::Internal(format!(
                "comment {} has unknown entity kind {}",
                self.id, self.entity_kind
            ))
        })?;

        Ok(Comment {
            id: self.id,
            user_id: self.user_id,
            target: CommentTarget::new(kind, self.entity_id),
            content: self.content,
            status: CommentStatus::from_i16(self.status),
            created_at: self.created_at,
        })
    }
}

/// PostgreSQL comment repository implementation.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (user_id, entity_kind, entity_id, content, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, user_id, entity_kind, entity_id, content, status, created_at
            "#,
        )
        .bind(comment.user_id)
        .bind(comment.target.kind().as_i16())
        .bind(comment.target.id())
        .bind(&comment.content)
        .bind(comment.status.as_i16())
        .bind(comment.created_at)
        .fetch_one(&self.pool)
        .await?;

        row.into_comment()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, user_id, entity_kind, entity_id, content, status, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_comment()).transpose()
    }
}
