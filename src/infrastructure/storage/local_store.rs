//! Local Avatar Store
//!
//! Filesystem implementation of the AvatarStore port. Files land in the
//! configured upload directory; a single write per file, no locking.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::application::services::AvatarStore;
use crate::shared::error::AppError;

/// Stores avatar files under a configured directory.
#[derive(Debug, Clone)]
pub struct LocalAvatarStore {
    root: PathBuf,
}

impl LocalAvatarStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve a stored file's path. File names come from URLs, so
    /// anything that could escape the root directory is rejected.
    fn resolve(&self, file_name: &str) -> Result<PathBuf, AppError> {
        if file_name.is_empty()
            || file_name.contains(['/', '\\'])
            || Path::new(file_name).components().count() != 1
            || file_name == ".."
        {
            return Err(AppError::BadRequest("invalid file name".into()));
        }
        Ok(self.root.join(file_name))
    }
}

#[async_trait]
impl AvatarStore for LocalAvatarStore {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<(), AppError> {
        let path = self.resolve(file_name)?;
        tokio::fs::create_dir_all(&self.root).await?;
        tokio::fs::write(&path, bytes).await?;
        Ok(())
    }

    async fn load(&self, file_name: &str) -> Result<Vec<u8>, AppError> {
        let path = self.resolve(file_name)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(AppError::NotFound(format!("avatar file {} not found", file_name)))
            }
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use uuid::Uuid;

    fn scratch_store() -> LocalAvatarStore {
        LocalAvatarStore::new(std::env::temp_dir().join(format!("forum-avatars-{}", Uuid::new_v4())))
    }

    #[tokio::test]
    async fn test_save_then_load_roundtrip() {
        let store = scratch_store();

        store.save("abc.png", b"imagedata").await.unwrap();
        let bytes = store.load("abc.png").await.unwrap();

        assert_eq!(bytes, b"imagedata".to_vec());
    }

    #[tokio::test]
    async fn test_load_missing_file_is_not_found() {
        let store = scratch_store();

        let result = store.load("missing.png").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_path_escape_attempts_are_rejected() {
        let store = scratch_store();

        for name in ["../etc/passwd", "a/b.png", "..", ""] {
            let result = store.load(name).await;
            assert!(
                matches!(result, Err(AppError::BadRequest(_))),
                "{:?} should be rejected",
                name
            );
        }
    }

    #[tokio::test]
    async fn test_save_replaces_existing_file() {
        let store = scratch_store();

        store.save("abc.png", b"old").await.unwrap();
        store.save("abc.png", b"new").await.unwrap();

        assert_eq!(store.load("abc.png").await.unwrap(), b"new".to_vec());
    }
}
