//! Response DTOs
//!
//! The JSON envelope every AJAX-style endpoint answers with, plus the
//! typed payloads that ride inside it.

use serde::Serialize;

use crate::application::services::{ProfileDto, UserDto};

/// The `{"code": 0|1, "msg"?, "data"?}` envelope.
///
/// `code` 0 means success; 1 carries a user-visible message. Validation
/// outcomes answer HTTP 200 with code 1, matching the original contract.
#[derive(Debug, Serialize)]
pub struct ApiEnvelope<T: Serialize> {
    pub code: u8,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiEnvelope<()> {
    /// Bare success, no payload.
    pub fn ok() -> Self {
        Self {
            code: 0,
            msg: None,
            data: None,
        }
    }

    /// User-visible failure message.
    pub fn fail(msg: impl Into<String>) -> Self {
        Self {
            code: 1,
            msg: Some(msg.into()),
            data: None,
        }
    }
}

impl<T: Serialize> ApiEnvelope<T> {
    /// Success with a payload.
    pub fn ok_with(data: T) -> Self {
        Self {
            code: 0,
            msg: None,
            data: Some(data),
        }
    }
}

/// Public user view
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub avatar_url: Option<String>,
    pub created_at: String,
}

impl From<UserDto> for UserResponse {
    fn from(dto: UserDto) -> Self {
        Self {
            id: dto.id,
            username: dto.username,
            avatar_url: dto.avatar_url,
            created_at: dto.created_at,
        }
    }
}

/// Aggregate profile view
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub like_count: i64,
    pub followee_count: i64,
    pub follower_count: i64,
    pub has_followed: bool,
}

impl From<ProfileDto> for ProfileResponse {
    fn from(dto: ProfileDto) -> Self {
        Self {
            user: UserResponse::from(dto.user),
            like_count: dto.like_count,
            followee_count: dto.followee_count,
            follower_count: dto.follower_count,
            has_followed: dto.has_followed,
        }
    }
}

/// Upload credential for the cloud bucket
#[derive(Debug, Serialize)]
pub struct UploadCredentialResponse {
    pub file_name: String,
    pub upload_token: String,
    pub expires_in: u64,
}
