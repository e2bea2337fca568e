//! Credential Service
//!
//! Password change: a strictly ordered verify-then-mutate flow. Nothing is
//! written until every check passes, and success revokes the user's
//! sessions so they must log in again.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;

use crate::domain::{SessionRepository, UserRepository};

/// Credential service trait
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Change the user's password after verifying the old one.
    async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError>;
}

/// Credential service errors. The first four are user-visible validation
/// outcomes, not faults.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("Original password must not be blank")]
    BlankOldPassword,

    #[error("Incorrect original password")]
    IncorrectOldPassword,

    #[error("New password must not be blank")]
    BlankNewPassword,

    #[error("New password must differ from the original")]
    PasswordUnchanged,

    #[error("User not found")]
    UserNotFound,

    #[error("Password update failed")]
    UpdateFailed,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// CredentialService implementation
pub struct CredentialServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
}

impl<U, S> CredentialServiceImpl<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>) -> Self {
        Self {
            user_repo,
            session_repo,
        }
    }

    /// Hash a password using Argon2id
    fn hash_password(&self, password: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        argon2
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| CredentialError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against its stored hash
    fn verify_password(&self, password: &str, hash: &str) -> Result<bool, CredentialError> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| CredentialError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[async_trait]
impl<U, S> CredentialService for CredentialServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    async fn change_password(
        &self,
        user_id: i64,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), CredentialError> {
        if old_password.trim().is_empty() {
            return Err(CredentialError::BlankOldPassword);
        }

        let user = self
            .user_repo
            .find_by_id(user_id)
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?
            .ok_or(CredentialError::UserNotFound)?;

        if !self.verify_password(old_password, &user.password_hash)? {
            return Err(CredentialError::IncorrectOldPassword);
        }

        if new_password.trim().is_empty() {
            return Err(CredentialError::BlankNewPassword);
        }

        // The same password verifying against the current hash means the
        // "new" password is not new.
        if self.verify_password(new_password, &user.password_hash)? {
            return Err(CredentialError::PasswordUnchanged);
        }

        let new_hash = self.hash_password(new_password)?;
        let updated = self
            .user_repo
            .update_password_hash(user_id, &new_hash)
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?;

        if updated == 0 {
            return Err(CredentialError::UpdateFailed);
        }

        let revoked = self
            .session_repo
            .revoke_all_for_user(user_id)
            .await
            .map_err(|e| CredentialError::Internal(e.to_string()))?;
        tracing::info!(user_id, revoked, "password changed, sessions revoked");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MockSessionRepository, MockUserRepository, User};
    use chrono::Utc;
    use mockall::predicate::eq;

    fn service_with(
        user_repo: MockUserRepository,
        session_repo: MockSessionRepository,
    ) -> CredentialServiceImpl<MockUserRepository, MockSessionRepository> {
        CredentialServiceImpl::new(Arc::new(user_repo), Arc::new(session_repo))
    }

    fn user_with_password(password: &str) -> User {
        let probe = service_with(MockUserRepository::new(), MockSessionRepository::new());
        let now = Utc::now();
        User {
            id: 7,
            username: "testuser".into(),
            email: "test@example.com".into(),
            password_hash: probe.hash_password(password).unwrap(),
            avatar_url: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_blank_old_password_rejected_without_any_persistence_call() {
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo.expect_find_by_id().never();
        user_repo.expect_update_password_hash().never();
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "", "newpass").await;

        assert!(matches!(result, Err(CredentialError::BlankOldPassword)));
    }

    #[tokio::test]
    async fn test_incorrect_old_password_leaves_credentials_untouched() {
        let user = user_with_password("hunter2");
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo
            .expect_find_by_id()
            .with(eq(7))
            .returning(move |_| Ok(Some(user.clone())));
        user_repo.expect_update_password_hash().never();
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "wrong", "newpass").await;

        assert!(matches!(result, Err(CredentialError::IncorrectOldPassword)));
    }

    #[tokio::test]
    async fn test_blank_new_password_rejected_after_old_verifies() {
        let user = user_with_password("hunter2");
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo.expect_update_password_hash().never();
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "hunter2", "   ").await;

        assert!(matches!(result, Err(CredentialError::BlankNewPassword)));
    }

    #[tokio::test]
    async fn test_reusing_current_password_is_rejected_without_mutation() {
        let user = user_with_password("hunter2");
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo.expect_update_password_hash().never();
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "hunter2", "hunter2").await;

        assert!(matches!(result, Err(CredentialError::PasswordUnchanged)));
    }

    #[tokio::test]
    async fn test_missing_user_fails_the_operation() {
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo.expect_find_by_id().returning(|_| Ok(None));
        user_repo.expect_update_password_hash().never();
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "hunter2", "newpass").await;

        assert!(matches!(result, Err(CredentialError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_success_updates_hash_and_revokes_sessions() {
        let user = user_with_password("hunter2");
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_update_password_hash()
            .withf(|id, hash| *id == 7 && hash.starts_with("$argon2"))
            .times(1)
            .returning(|_, _| Ok(1));
        session_repo
            .expect_revoke_all_for_user()
            .with(eq(7))
            .times(1)
            .returning(|_| Ok(2));

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "hunter2", "correct horse").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_zero_rows_affected_reports_failure_without_revocation() {
        let user = user_with_password("hunter2");
        let mut user_repo = MockUserRepository::new();
        let mut session_repo = MockSessionRepository::new();
        user_repo
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        user_repo
            .expect_update_password_hash()
            .returning(|_, _| Ok(0));
        session_repo.expect_revoke_all_for_user().never();

        let service = service_with(user_repo, session_repo);
        let result = service.change_password(7, "hunter2", "correct horse").await;

        assert!(matches!(result, Err(CredentialError::UpdateFailed)));
    }

    #[test]
    fn test_hash_then_verify_roundtrip() {
        let service = service_with(MockUserRepository::new(), MockSessionRepository::new());

        let hash = service.hash_password("hunter2").unwrap();

        assert!(service.verify_password("hunter2", &hash).unwrap());
        assert!(!service.verify_password("hunter3", &hash).unwrap());
    }
}
