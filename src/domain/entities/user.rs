//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Represents a user account in the forum.
///
/// Maps to the `users` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - username: VARCHAR(32) NOT NULL UNIQUE
/// - email: VARCHAR(255) NOT NULL UNIQUE
/// - password_hash: VARCHAR(255) NOT NULL
/// - avatar_url: TEXT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// The password hash is an Argon2id PHC string; the per-user salt lives
/// inside it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Primary key
    pub id: i64,

    /// Username (unique)
    pub username: String,

    /// Email address (unique)
    pub email: String,

    /// Argon2id password hash (PHC string, salt embedded)
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// URL of the user's avatar image
    pub avatar_url: Option<String>,

    /// Account creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Repository trait for User data access operations.
///
/// Only the operations this service mutates or reads are exposed; user
/// lifecycle (registration, deletion) is owned elsewhere.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their ID.
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, AppError>;

    /// Replace the user's avatar URL. Returns the number of rows affected.
    async fn update_avatar_url(&self, id: i64, avatar_url: &str) -> Result<u64, AppError>;

    /// Replace the user's password hash. Returns the number of rows affected.
    async fn update_password_hash(&self, id: i64, password_hash: &str) -> Result<u64, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user() -> User {
        let now = Utc::now();
        User {
            id: 7,
            username: "testuser".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$hash".to_string(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = create_test_user();

        let serialized = serde_json::to_string(&user).expect("Failed to serialize user");

        assert!(!serialized.contains("password_hash"));
        assert!(!serialized.contains("argon2id"));
    }

    #[test]
    fn test_serialization_includes_identity_fields() {
        let user = create_test_user();

        let serialized = serde_json::to_string(&user).expect("Failed to serialize user");

        assert!(serialized.contains("\"id\":7"));
        assert!(serialized.contains("\"username\":\"testuser\""));
        assert!(serialized.contains("\"email\":\"test@example.com\""));
    }
}
