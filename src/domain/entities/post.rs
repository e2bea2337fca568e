//! Discussion post entity and repository trait.
//!
//! Posts are read-only in this scope; creation and moderation are owned by
//! the persistence layer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A discussion post. Maps to the `discuss_posts` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscussPost {
    /// Primary key
    pub id: i64,

    /// Author's user id
    pub user_id: i64,

    /// Post title
    pub title: String,

    /// Post body
    pub content: String,

    /// Moderation status (0 = normal)
    pub status: i16,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Denormalized comment count
    pub comment_count: i32,
}

/// Repository trait for post lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<DiscussPost>, AppError>;
}
