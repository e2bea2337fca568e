//! Session Repository Implementation
//!
//! PostgreSQL implementation of the SessionRepository trait. Only the
//! revocation side lives here; issuance is owned by the auth service.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::SessionRepository;
use crate::shared::error::AppError;

/// PostgreSQL session repository implementation.
#[derive(Clone)]
pub struct PgSessionRepository {
    pool: PgPool,
}

impl PgSessionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for PgSessionRepository {
    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
