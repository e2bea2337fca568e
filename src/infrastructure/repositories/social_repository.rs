//! Follow/Like Repository Implementations
//!
//! Redis-backed aggregates: likes are plain integer counters, follow
//! relations are sorted sets keyed per user. A key that does not exist
//! reads as zero / not-followed.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::domain::{FollowRepository, LikeRepository};
use crate::infrastructure::cache::keys;
use crate::shared::error::AppError;

/// Redis follow repository implementation.
#[derive(Clone)]
pub struct RedisFollowRepository {
    conn: ConnectionManager,
}

impl RedisFollowRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl FollowRepository for RedisFollowRepository {
    async fn followee_count(&self, user_id: i64) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.zcard(keys::followee(user_id)).await?;
        Ok(count)
    }

    async fn follower_count(&self, user_id: i64) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let count: i64 = conn.zcard(keys::follower(user_id)).await?;
        Ok(count)
    }

    async fn has_followed(&self, follower_id: i64, followee_id: i64) -> Result<bool, AppError> {
        let mut conn = self.conn.clone();
        let score: Option<f64> = conn.zscore(keys::followee(follower_id), followee_id).await?;
        Ok(score.is_some())
    }
}

/// Redis like repository implementation.
#[derive(Clone)]
pub struct RedisLikeRepository {
    conn: ConnectionManager,
}

impl RedisLikeRepository {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl LikeRepository for RedisLikeRepository {
    async fn user_like_count(&self, user_id: i64) -> Result<i64, AppError> {
        let mut conn = self.conn.clone();
        let count: Option<i64> = conn.get(keys::user_like_count(user_id)).await?;
        Ok(count.unwrap_or(0))
    }
}
