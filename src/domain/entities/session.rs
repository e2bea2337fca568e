//! Session revocation trait.
//!
//! Token issuance (login) is an external collaborator; this code only needs
//! to invalidate a user's sessions after a password change.

use async_trait::async_trait;

use crate::shared::error::AppError;

/// Repository trait for session revocation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Delete every stored session for the user, forcing re-login.
    /// Returns the number of sessions revoked.
    async fn revoke_all_for_user(&self, user_id: i64) -> Result<u64, AppError>;
}
