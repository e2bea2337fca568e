//! Comment entity, target discriminator and repository trait.
//!
//! A comment either replies to a post or to another comment. The target is
//! a tagged union so the owner lookup is typed per variant instead of
//! switching on a raw integer.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Discriminator for what a comment (or an event) points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Post,
    Comment,
}

impl EntityKind {
    /// Convert from the database smallint representation.
    pub fn from_i16(v: i16) -> Option<Self> {
        match v {
            1 => Some(Self::Post),
            2 => Some(Self::Comment),
            _ => None,
        }
    }

    /// Convert to the database smallint representation.
    pub fn as_i16(&self) -> i16 {
        match self {
            Self::Post => 1,
            Self::Comment => 2,
        }
    }

    /// Stable lowercase name, used in event payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Comment => "comment",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The entity a comment targets, with its id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentTarget {
    /// A top-level reply to a discussion post
    Post(i64),
    /// A reply to another comment
    Comment(i64),
}

impl CommentTarget {
    pub fn new(kind: EntityKind, id: i64) -> Self {
        match kind {
            EntityKind::Post => Self::Post(id),
            EntityKind::Comment => Self::Comment(id),
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Post(_) => EntityKind::Post,
            Self::Comment(_) => EntityKind::Comment,
        }
    }

    pub fn id(&self) -> i64 {
        match self {
            Self::Post(id) | Self::Comment(id) => *id,
        }
    }
}

/// Moderation status of a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentStatus {
    #[default]
    Visible,
    Hidden,
}

impl CommentStatus {
    /// Convert from the database smallint representation. Unknown values
    /// collapse to Hidden rather than leaking unmoderated content.
    pub fn from_i16(v: i16) -> Self {
        match v {
            0 => Self::Visible,
            _ => Self::Hidden,
        }
    }

    /// Convert to the database smallint representation (0 = visible).
    pub fn as_i16(&self) -> i16 {
        match self {
            Self::Visible => 0,
            Self::Hidden => 1,
        }
    }
}

/// A persisted comment. Immutable after creation in this scope.
#[derive(Debug, Clone)]
pub struct Comment {
    /// Primary key
    pub id: i64,

    /// Author's user id
    pub user_id: i64,

    /// What this comment replies to
    pub target: CommentTarget,

    /// Comment body
    pub content: String,

    /// Moderation status
    pub status: CommentStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A comment about to be persisted; the id is assigned by the database.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub user_id: i64,
    pub target: CommentTarget,
    pub content: String,
    pub status: CommentStatus,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for comment persistence and lookups.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Persist a new comment and return it with its assigned id.
    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError>;

    /// Find a comment by its ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(EntityKind::Post, 1; "post encodes to 1")]
    #[test_case(EntityKind::Comment, 2; "comment encodes to 2")]
    fn test_entity_kind_i16_roundtrip(kind: EntityKind, raw: i16) {
        assert_eq!(kind.as_i16(), raw);
        assert_eq!(EntityKind::from_i16(raw), Some(kind));
    }

    #[test]
    fn test_entity_kind_rejects_unknown_tag() {
        assert_eq!(EntityKind::from_i16(0), None);
        assert_eq!(EntityKind::from_i16(3), None);
    }

    #[test]
    fn test_entity_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&EntityKind::Post).unwrap(), "\"post\"");
        assert_eq!(
            serde_json::to_string(&EntityKind::Comment).unwrap(),
            "\"comment\""
        );
    }

    #[test]
    fn test_comment_target_construction() {
        let target = CommentTarget::new(EntityKind::Post, 42);
        assert_eq!(target, CommentTarget::Post(42));
        assert_eq!(target.kind(), EntityKind::Post);
        assert_eq!(target.id(), 42);

        let target = CommentTarget::new(EntityKind::Comment, 9);
        assert_eq!(target, CommentTarget::Comment(9));
        assert_eq!(target.kind(), EntityKind::Comment);
        assert_eq!(target.id(), 9);
    }

    #[test]
    fn test_comment_status_default_is_visible() {
        assert_eq!(CommentStatus::default(), CommentStatus::Visible);
        assert_eq!(CommentStatus::default().as_i16(), 0);
    }

    #[test_case(0, CommentStatus::Visible)]
    #[test_case(1, CommentStatus::Hidden)]
    #[test_case(7, CommentStatus::Hidden; "unknown collapses to hidden")]
    fn test_comment_status_from_i16(raw: i16, expected: CommentStatus) {
        assert_eq!(CommentStatus::from_i16(raw), expected);
    }
}
