//! Notification events and the producer trait.
//!
//! An event records "who did what to whose content". Events are serialized
//! to JSON, handed to the producer and forgotten; no acknowledgment or
//! retention contract exists on this side.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::entities::{CommentTarget, EntityKind};
use crate::shared::error::AppError;

/// Topic for comment-notification events.
pub const TOPIC_COMMENT: &str = "comment";

/// A structured notification record, delivered to subscribers out-of-band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Routing topic (e.g. "comment")
    pub topic: String,

    /// The acting user
    pub user_id: i64,

    /// Kind of entity acted upon
    pub entity_kind: EntityKind,

    /// Id of the entity acted upon
    pub entity_id: i64,

    /// Owner of the entity acted upon; the notification recipient
    pub entity_user_id: i64,

    /// Free-form payload (e.g. the enclosing post id)
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl Event {
    /// Build an event for an action against a comment target.
    pub fn new(topic: &str, user_id: i64, target: CommentTarget, entity_user_id: i64) -> Self {
        Self {
            topic: topic.to_string(),
            user_id,
            entity_kind: target.kind(),
            entity_id: target.id(),
            entity_user_id,
            data: Map::new(),
        }
    }

    /// Attach a payload entry.
    pub fn with_data(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

/// Hands events to the external fan-out subscriber system.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventProducer: Send + Sync {
    /// Publish the event. Fire-and-forget from the caller's point of view.
    async fn fire(&self, event: &Event) -> Result<(), AppError>;
}
