//! Event Infrastructure
//!
//! Redis pub/sub implementation of the EventProducer trait. Events are
//! serialized to JSON and published on a per-topic channel; subscribers
//! (the notification consumer) live in another process.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use crate::domain::events::{Event, EventProducer};
use crate::infrastructure::cache::keys;
use crate::infrastructure::metrics::EVENTS_PUBLISHED_TOTAL;
use crate::shared::error::AppError;

/// Publishes events on Redis pub/sub channels.
#[derive(Clone)]
pub struct RedisEventProducer {
    conn: ConnectionManager,
}

impl RedisEventProducer {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl EventProducer for RedisEventProducer {
    async fn fire(&self, event: &Event) -> Result<(), AppError> {
        let payload = serde_json::to_string(event)
            .map_err(|e| AppError::Internal(format!("event serialization failed: {}", e)))?;

        let channel = keys::event_channel(&event.topic);
        let mut conn = self.conn.clone();
        let receivers: i64 = conn.publish(&channel, payload).await?;

        EVENTS_PUBLISHED_TOTAL
            .with_label_values(&[event.topic.as_str()])
            .inc();
        tracing::debug!(
            topic = %event.topic,
            entity_user_id = event.entity_user_id,
            receivers,
            "event published"
        );

        Ok(())
    }
}
