//! Avatar Service
//!
//! Two replacement paths for a user's avatar: a direct multipart upload
//! stored locally, and a handoff for an object already uploaded to the
//! cloud bucket. Either way the stored avatar URL is fully replaced.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::config::{StorageSettings, UploadSettings};
use crate::domain::UserRepository;
use crate::shared::error::AppError;

/// Blob storage the uploaded avatar files live in.
///
/// The port is defined here, at the consuming seam; the local-filesystem
/// implementation lives in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AvatarStore: Send + Sync {
    /// Persist the file bytes under the given name.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), AppError>;

    /// Read the file bytes back. `AppError::NotFound` when absent.
    async fn load(&self, file_name: &str) -> Result<Vec<u8>, AppError>;
}

/// Avatar service trait
#[async_trait]
pub trait AvatarService: Send + Sync {
    /// Store an uploaded image and point the user's avatar URL at it.
    /// Returns the new avatar URL.
    async fn upload(
        &self,
        user_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AvatarError>;

    /// Point the user's avatar URL at an object already uploaded to the
    /// cloud bucket. Returns the new avatar URL.
    async fn set_remote(&self, user_id: i64, file_name: &str) -> Result<String, AvatarError>;

    /// Serve a stored avatar image.
    async fn serve(&self, file_name: &str) -> Result<AvatarImage, AvatarError>;
}

/// A stored avatar image ready to stream back.
#[derive(Debug, Clone)]
pub struct AvatarImage {
    /// Derived naively from the filename suffix, not sniffed.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Avatar service errors
#[derive(Debug, thiserror::Error)]
pub enum AvatarError {
    #[error("File format is not valid")]
    BlankExtension,

    #[error("File name must not be blank")]
    BlankFileName,

    #[error("User not found")]
    UserNotFound,

    #[error("Avatar file not found")]
    NotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// AvatarService implementation
pub struct AvatarServiceImpl<U, S>
where
    U: UserRepository,
    S: AvatarStore,
{
    user_repo: Arc<U>,
    store: Arc<S>,
    upload: UploadSettings,
    storage: StorageSettings,
}

impl<U, S> AvatarServiceImpl<U, S>
where
    U: UserRepository,
    S: AvatarStore,
{
    pub fn new(
        user_repo: Arc<U>,
        store: Arc<S>,
        upload: UploadSettings,
        storage: StorageSettings,
    ) -> Self {
        Self {
            user_repo,
            store,
            upload,
            storage,
        }
    }

    async fn replace_avatar_url(&self, user_id: i64, url: &str) -> Result<(), AvatarError> {
        let updated = self
            .user_repo
            .update_avatar_url(user_id, url)
            .await
            .map_err(|e| AvatarError::Internal(e.to_string()))?;

        if updated == 0 {
            return Err(AvatarError::UserNotFound);
        }
        Ok(())
    }
}

/// Extension of an uploaded filename, lowercased. None when absent or empty.
fn file_extension(name: &str) -> Option<String> {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| ext.to_ascii_lowercase())
}

#[async_trait]
impl<U, S> AvatarService for AvatarServiceImpl<U, S>
where
    U: UserRepository + 'static,
    S: AvatarStore + 'static,
{
    async fn upload(
        &self,
        user_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<String, AvatarError> {
        let ext = file_extension(original_name).ok_or(AvatarError::BlankExtension)?;

        // Random names make collisions astronomically unlikely; they are
        // not formally prevented.
        let file_name = format!("{}.{}", Uuid::new_v4(), ext);

        self.store
            .save(&file_name, bytes)
            .await
            .map_err(|e| AvatarError::Internal(e.to_string()))?;

        let url = self.upload.header_url(&file_name);
        self.replace_avatar_url(user_id, &url).await?;

        tracing::info!(user_id, file_name = %file_name, "avatar uploaded");
        Ok(url)
    }

    async fn set_remote(&self, user_id: i64, file_name: &str) -> Result<String, AvatarError> {
        if file_name.trim().is_empty() {
            return Err(AvatarError::BlankFileName);
        }

        let url = self.storage.object_url(file_name);
        self.replace_avatar_url(user_id, &url).await?;

        tracing::info!(user_id, file_name, "avatar set from bucket");
        Ok(url)
    }

    async fn serve(&self, file_name: &str) -> Result<AvatarImage, AvatarError> {
        let bytes = self.store.load(file_name).await.map_err(|e| match e {
            AppError::NotFound(_) => AvatarError::NotFound,
            other => AvatarError::Internal(other.to_string()),
        })?;

        let content_type = match file_extension(file_name) {
            Some(ext) => format!("image/{}", ext),
            None => "application/octet-stream".to_string(),
        };

        Ok(AvatarImage {
            content_type,
            bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MockUserRepository;
    use pretty_assertions::assert_eq;

    fn upload_settings() -> UploadSettings {
        UploadSettings {
            path: "/tmp/forum/upload".into(),
            domain: "http://localhost:8080".into(),
            context_path: "/community".into(),
        }
    }

    fn storage_settings() -> StorageSettings {
        StorageSettings {
            access_key: "ak".into(),
            secret_key: "sk".into(),
            bucket_name: "forum-header".into(),
            bucket_url: "http://cdn.example.com".into(),
            token_ttl_secs: 3600,
        }
    }

    fn service_with(
        user_repo: MockUserRepository,
        store: MockAvatarStore,
    ) -> AvatarServiceImpl<MockUserRepository, MockAvatarStore> {
        AvatarServiceImpl::new(
            Arc::new(user_repo),
            Arc::new(store),
            upload_settings(),
            storage_settings(),
        )
    }

    #[tokio::test]
    async fn test_upload_stores_file_and_builds_served_url() {
        let mut user_repo = MockUserRepository::new();
        let mut store = MockAvatarStore::new();

        store
            .expect_save()
            .withf(|name, bytes| name.ends_with(".png") && bytes == b"imagedata".as_slice())
            .times(1)
            .returning(|_, _| Ok(()));
        user_repo
            .expect_update_avatar_url()
            .withf(|id, url| {
                *id == 7
                    && url.starts_with("http://localhost:8080/community/user/header/")
                    && url.ends_with(".png")
            })
            .times(1)
            .returning(|_, _| Ok(1));

        let service = service_with(user_repo, store);
        let url = service.upload(7, "portrait.PNG", b"imagedata").await.unwrap();

        assert!(url.starts_with("http://localhost:8080/community/user/header/"));
        assert!(url.ends_with(".png"));
    }

    #[tokio::test]
    async fn test_upload_without_extension_is_rejected_before_any_write() {
        let mut user_repo = MockUserRepository::new();
        let mut store = MockAvatarStore::new();
        store.expect_save().never();
        user_repo.expect_update_avatar_url().never();

        let service = service_with(user_repo, store);
        let result = service.upload(7, "portrait", b"imagedata").await;

        assert!(matches!(result, Err(AvatarError::BlankExtension)));
    }

    #[tokio::test]
    async fn test_upload_for_unknown_user_reports_not_found() {
        let mut user_repo = MockUserRepository::new();
        let mut store = MockAvatarStore::new();
        store.expect_save().returning(|_, _| Ok(()));
        user_repo
            .expect_update_avatar_url()
            .returning(|_, _| Ok(0));

        let service = service_with(user_repo, store);
        let result = service.upload(404, "portrait.png", b"imagedata").await;

        assert!(matches!(result, Err(AvatarError::UserNotFound)));
    }

    #[tokio::test]
    async fn test_set_remote_concatenates_bucket_url() {
        let mut user_repo = MockUserRepository::new();
        let store = MockAvatarStore::new();
        user_repo
            .expect_update_avatar_url()
            .withf(|id, url| *id == 7 && url == "http://cdn.example.com/abc.png")
            .times(1)
            .returning(|_, _| Ok(1));

        let service = service_with(user_repo, store);
        let url = service.set_remote(7, "abc.png").await.unwrap();

        assert_eq!(url, "http://cdn.example.com/abc.png");
    }

    #[tokio::test]
    async fn test_set_remote_rejects_blank_file_name() {
        let mut user_repo = MockUserRepository::new();
        let store = MockAvatarStore::new();
        user_repo.expect_update_avatar_url().never();

        let service = service_with(user_repo, store);
        let result = service.set_remote(7, "   ").await;

        assert!(matches!(result, Err(AvatarError::BlankFileName)));
    }

    #[tokio::test]
    async fn test_serve_derives_content_type_from_suffix() {
        let user_repo = MockUserRepository::new();
        let mut store = MockAvatarStore::new();
        store
            .expect_load()
            .returning(|_| Ok(b"imagedata".to_vec()));

        let service = service_with(user_repo, store);
        let image = service.serve("abc.PNG").await.unwrap();

        assert_eq!(image.content_type, "image/png");
        assert_eq!(image.bytes, b"imagedata".to_vec());
    }

    #[tokio::test]
    async fn test_serve_missing_file_is_not_found() {
        let user_repo = MockUserRepository::new();
        let mut store = MockAvatarStore::new();
        store
            .expect_load()
            .returning(|_| Err(AppError::NotFound("no such file".into())));

        let service = service_with(user_repo, store);
        let result = service.serve("missing.png").await;

        assert!(matches!(result, Err(AvatarError::NotFound)));
    }

    #[test]
    fn test_file_extension_handling() {
        assert_eq!(file_extension("a.png"), Some("png".into()));
        assert_eq!(file_extension("a.tar.GZ"), Some("gz".into()));
        assert_eq!(file_extension("noext"), None);
        assert_eq!(file_extension(""), None);
    }
}
