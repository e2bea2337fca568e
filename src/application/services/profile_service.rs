//! Profile Service
//!
//! Assembles the aggregate profile view: the user record plus like and
//! follow counters. The aggregate queries are independent and idempotent,
//! so they are issued concurrently.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{FollowRepository, LikeRepository, User, UserRepository};

/// Profile service trait
#[async_trait]
pub trait ProfileService: Send + Sync {
    /// Aggregate the profile of `user_id` as seen by `viewer_id` (if any).
    async fn get_profile(
        &self,
        user_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<ProfileDto, ProfileError>;
}

/// Aggregate profile view
#[derive(Debug, Clone)]
pub struct ProfileDto {
    pub user: UserDto,
    pub like_count: i64,
    pub followee_count: i64,
    pub follower_count: i64,
    pub has_followed: bool,
}

/// Public user data transfer object
#[derive(Debug, Clone)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            avatar_url: user.avatar_url,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Profile service errors
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    #[error("User not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// ProfileService implementation
pub struct ProfileServiceImpl<U, F, L>
where
    U: UserRepository,
    F: FollowRepository,
    L: LikeRepository,
{
    user_repo: Arc<U>,
    follow_repo: Arc<F>,
    like_repo: Arc<L>,
}

impl<U, F, L> ProfileServiceImpl<U, F, L>
where
    U: UserRepository,
    F: FollowRepository,
    L: LikeRepository,
{
    pub fn new(user_repo: Arc<U>, follow_repo: Arc<F>, like_repo: Arc<L>) -> Self {
        Self {
            user_repo,
            follow_repo,
            like_repo,
        }
    }
}

#[async_trait]
impl<U, F, L> ProfileService for ProfileServiceImpl<U, F, L>
where
    U: UserRepository + 'static,
    F: FollowRepository + 'static,
    L: LikeRepository + 'static,
{
    async fn get_profile(
        &self,
        user_id: i64,
        viewer_id: Option<i64>,
    ) -> Result<ProfileDto, ProfileError> {
        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| ProfileError::Internal(e.to_string()))?
            .ok_or(ProfileError::NotFound)?;

        // No ordering dependency between the aggregates; issue them
        // concurrently. An anonymous viewer never queries the follow
        // relation.
        let has_followed = async {
            match viewer_id {
                Some(viewer) => self.follow_repo.has_followed(viewer, user_id).await,
                None => Ok(false),
            }
        };

        let (like_count, followee_count, follower_count, has_followed) = tokio::try_join!(
            self.like_repo.user_like_count(user_id),
            self.follow_repo.followee_count(user_id),
            self.follow_repo.follower_count(user_id),
            has_followed,
        )
        .map_err(|e| ProfileError::Internal(e.to_string()))?;

        Ok(ProfileDto {
            user: UserDto::from(user),
            like_count,
            followee_count,
            follower_count,
            has_followed,
        })
    }
}
