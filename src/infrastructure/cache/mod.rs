//! Redis Module
//!
//! Connection management plus the key shapes for the social counters and
//! the event channels. Likes and follow relations are counter/sorted-set
//! data, so they live in Redis rather than PostgreSQL.

use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
///
/// The connection manager handles connection pooling and automatic
/// reconnection when the connection is lost.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Redis key shapes.
///
/// Use these helpers to keep key naming consistent across the application.
pub mod keys {
    /// Total likes a user's content has received (plain integer counter).
    #[inline]
    pub fn user_like_count(user_id: i64) -> String {
        format!("like:user:{}", user_id)
    }

    /// Sorted set of user ids this user follows.
    #[inline]
    pub fn followee(user_id: i64) -> String {
        format!("followee:user:{}", user_id)
    }

    /// Sorted set of user ids following this user.
    #[inline]
    pub fn follower(user_id: i64) -> String {
        format!("follower:user:{}", user_id)
    }

    /// Pub/sub channel a topic's events are published on.
    #[inline]
    pub fn event_channel(topic: &str) -> String {
        format!("events:{}", topic)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_key_shapes() {
            assert_eq!(user_like_count(7), "like:user:7");
            assert_eq!(followee(7), "followee:user:7");
            assert_eq!(follower(7), "follower:user:7");
            assert_eq!(event_channel("comment"), "events:comment");
        }
    }
}
