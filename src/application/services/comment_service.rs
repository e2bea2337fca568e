//! Comment Service
//!
//! Persists new comments and emits the notification event that fans out to
//! the targeted entity's owner.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{
    Comment, CommentRepository, CommentStatus, CommentTarget, EventProducer, NewComment,
    PostRepository, TOPIC_COMMENT,
};
use crate::domain::events::Event;

/// Comment service trait
#[async_trait]
pub trait CommentService: Send + Sync {
    /// Add a comment under a discussion post and notify the target's owner.
    async fn add_comment(
        &self,
        discuss_post_id: i64,
        author_id: i64,
        request: CreateCommentDto,
    ) -> Result<CommentDto, CommentError>;
}

/// Create comment request
#[derive(Debug, Clone)]
pub struct CreateCommentDto {
    pub target: CommentTarget,
    pub content: String,
}

/// Comment data transfer object
#[derive(Debug, Clone)]
pub struct CommentDto {
    pub id: String,
    pub user_id: String,
    pub entity_kind: String,
    pub entity_id: String,
    pub content: String,
    pub created_at: String,
}

impl From<Comment> for CommentDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            user_id: comment.user_id.to_string(),
            entity_kind: comment.target.kind().as_str().to_string(),
            entity_id: comment.target.id().to_string(),
            content: comment.content,
            created_at: comment.created_at.to_rfc3339(),
        }
    }
}

/// Comment service errors
#[derive(Debug, thiserror::Error)]
pub enum CommentError {
    #[error("Target entity not found")]
    TargetNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// CommentService implementation
pub struct CommentServiceImpl<C, P, E>
where
    C: CommentRepository,
    P: PostRepository,
    E: EventProducer,
{
    comment_repo: Arc<C>,
    post_repo: Arc<P>,
    producer: Arc<E>,
}

impl<C, P, E> CommentServiceImpl<C, P, E>
where
    C: CommentRepository,
    P: PostRepository,
    E: EventProducer,
{
    pub fn new(comment_repo: Arc<C>, post_repo: Arc<P>, producer: Arc<E>) -> Self {
        Self {
            comment_repo,
            post_repo,
            producer,
        }
    }

    /// Resolve the owner of whatever the new comment targets. The lookup is
    /// typed per variant; a dangling target is a structured failure, caught
    /// before anything is written.
    async fn resolve_target_owner(&self, target: CommentTarget) -> Result<i64, CommentError> {
        match target {
            CommentTarget::Post(id) => {
                let post = self
                    .post_repo
                    .find_by_id(id)
                    .await
                    .map_err(|e| CommentError::Internal(e.to_string()))?
                    .ok_or(CommentError::TargetNotFound)?;
                Ok(post.user_id)
            }
            CommentTarget::Comment(id) => {
                let parent = self
                    .comment_repo
                    .find_by_id(id)
                    .await
                    .map_err(|e| CommentError::Internal(e.to_string()))?
                    .ok_or(CommentError::TargetNotFound)?;
                Ok(parent.user_id)
            }
        }
    }
}

#[async_trait]
impl<C, P, E> CommentService for CommentServiceImpl<C, P, E>
where
    C: CommentRepository + 'static,
    P: PostRepository + 'static,
    E: EventProducer + 'static,
{
    async fn add_comment(
        &self,
        discuss_post_id: i64,
        author_id: i64,
        request: CreateCommentDto,
    ) -> Result<CommentDto, CommentError> {
        let entity_user_id = self.resolve_target_owner(request.target).await?;

        let new_comment = NewComment {
            user_id: author_id,
            target: request.target,
            content: request.content,
            status: CommentStatus::Visible,
            created_at: Utc::now(),
        };

        let comment = self
            .comment_repo
            .create(&new_comment)
            .await
            .map_err(|e| CommentError::Internal(e.to_string()))?;

        let event = Event::new(TOPIC_COMMENT, comment.user_id, comment.target, entity_user_id)
            .with_data("postId", discuss_post_id);

        // Fire-and-forget: the comment is already persisted, a lost
        // notification must not fail the request.
        if let Err(e) = self.producer.fire(&event).await {
            tracing::warn!(topic = TOPIC_COMMENT, error = %e, "event publish failed");
        }

        Ok(CommentDto::from(comment))
    }
}
