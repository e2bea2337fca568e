//! Comment Handlers

use std::sync::Arc;

use axum::{
    extract::{Extension, Path, State},
    response::Redirect,
    Form,
};
use validator::Validate;

use crate::application::dto::request::AddCommentRequest;
use crate::application::services::{
    CommentError, CommentService, CommentServiceImpl, CreateCommentDto,
};
use crate::domain::CommentTarget;
use crate::infrastructure::events::RedisEventProducer;
use crate::infrastructure::repositories::{PgCommentRepository, PgPostRepository};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;
use crate::startup::AppState;

/// Add a comment under a discussion post
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Path(discuss_post_id): Path<String>,
    Form(body): Form<AddCommentRequest>,
) -> Result<Redirect, AppError> {
    let discuss_post_id: i64 = discuss_post_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid post ID".into()))?;

    // Validate request
    body.validate().map_err(validation_error)?;

    let comment_repo = Arc::new(PgCommentRepository::new(state.db.clone()));
    let post_repo = Arc::new(PgPostRepository::new(state.db.clone()));
    let producer = Arc::new(RedisEventProducer::new(state.redis.clone()));
    let service = CommentServiceImpl::new(comment_repo, post_repo, producer);

    let request = CreateCommentDto {
        target: CommentTarget::new(body.entity_kind, body.entity_id),
        content: body.content,
    };

    service
        .add_comment(discuss_post_id, auth.user_id, request)
        .await
        .map_err(|e| match e {
            CommentError::TargetNotFound => AppError::NotFound("Target entity not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Redirect::to(&format!("/discuss/detail/{}", discuss_post_id)))
}
