//! Follow and like aggregate traits.
//!
//! Counters live in Redis; these traits only expose the read side the
//! profile page needs. Follow/unfollow writes are owned elsewhere.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Follow-relation aggregates for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// How many users this user follows.
    async fn followee_count(&self, user_id: i64) -> Result<i64, AppError>;

    /// How many users follow this user.
    async fn follower_count(&self, user_id: i64) -> Result<i64, AppError>;

    /// Whether `follower_id` already follows `followee_id`.
    async fn has_followed(&self, follower_id: i64, followee_id: i64) -> Result<bool, AppError>;
}

/// Like aggregates for a user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Total likes this user's content has received.
    async fn user_like_count(&self, user_id: i64) -> Result<i64, AppError>;
}
