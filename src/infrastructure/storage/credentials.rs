//! Object-Storage Upload Credentials
//!
//! The browser uploads the avatar straight to the cloud bucket; this
//! signer hands it a fresh object name plus a short-lived token scoped to
//! that object, signed with the storage secret key.

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::StorageSettings;
use crate::shared::error::AppError;

/// Claims carried by an upload token.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadClaims {
    /// Issuer: the storage access key
    pub iss: String,
    /// `bucket:object` the token is valid for
    pub scope: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    pub iat: i64,
}

/// A credential the client uses for one direct-to-bucket upload.
#[derive(Debug, Clone)]
pub struct UploadCredential {
    pub file_name: String,
    pub token: String,
    pub expires_in: u64,
}

/// Signs upload credentials for the avatar bucket.
#[derive(Debug, Clone)]
pub struct ObjectStorageSigner {
    settings: StorageSettings,
}

impl ObjectStorageSigner {
    pub fn new(settings: StorageSettings) -> Self {
        Self { settings }
    }

    /// Issue a credential for a fresh object name.
    pub fn issue(&self) -> Result<UploadCredential, AppError> {
        let file_name = Uuid::new_v4().to_string();
        let now = Utc::now();
        let ttl = self.settings.token_ttl_secs;

        let claims = UploadClaims {
            iss: self.settings.access_key.clone(),
            scope: format!("{}:{}", self.settings.bucket_name, file_name),
            exp: (now + Duration::seconds(ttl as i64)).timestamp(),
            iat: now.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.settings.secret_key.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("upload token signing failed: {}", e)))?;

        Ok(UploadCredential {
            file_name,
            token,
            expires_in: ttl,
        })
    }
}
