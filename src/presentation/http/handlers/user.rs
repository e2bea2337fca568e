//! User Handlers
//!
//! Profile aggregation, avatar management and the password-change flow.

use std::sync::Arc;

use axum::{
    extract::{Extension, Multipart, Path, State},
    http::header,
    response::{IntoResponse, Redirect},
    Form, Json,
};

use crate::application::dto::request::{ChangePasswordRequest, UpdateHeaderUrlRequest};
use crate::application::dto::response::{
    ApiEnvelope, ProfileResponse, UploadCredentialResponse,
};
use crate::application::services::{
    AvatarError, AvatarService, AvatarServiceImpl, CredentialError, CredentialService,
    CredentialServiceImpl, ProfileError, ProfileService, ProfileServiceImpl,
};
use crate::infrastructure::repositories::{
    PgSessionRepository, PgUserRepository, RedisFollowRepository, RedisLikeRepository,
};
use crate::infrastructure::storage::{LocalAvatarStore, ObjectStorageSigner};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

fn avatar_service(state: &AppState) -> AvatarServiceImpl<PgUserRepository, LocalAvatarStore> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let store = Arc::new(LocalAvatarStore::new(state.settings.upload.path.clone()));
    AvatarServiceImpl::new(
        user_repo,
        store,
        state.settings.upload.clone(),
        state.settings.storage.clone(),
    )
}

fn map_avatar_error(e: AvatarError) -> AppError {
    match e {
        AvatarError::BlankExtension | AvatarError::BlankFileName => {
            AppError::Validation(e.to_string())
        }
        AvatarError::UserNotFound => AppError::NotFound("User not found".into()),
        AvatarError::NotFound => AppError::NotFound("Avatar file not found".into()),
        AvatarError::Internal(msg) => AppError::Internal(msg),
    }
}

/// Issue an upload credential for the cloud avatar bucket
pub async fn get_setting(
    State(state): State<AppState>,
    Extension(_auth): Extension<AuthUser>,
) -> Result<Json<ApiEnvelope<UploadCredentialResponse>>, AppError> {
    let signer = ObjectStorageSigner::new(state.settings.storage.clone());
    let credential = signer.issue()?;

    Ok(Json(ApiEnvelope::ok_with(UploadCredentialResponse {
        file_name: credential.file_name,
        upload_token: credential.token,
        expires_in: credential.expires_in,
    })))
}

/// Accept a multipart avatar upload and store it locally
pub async fn upload_avatar(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Redirect, AppError> {
    let mut file: Option<(String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if let Some(name) = field.file_name().map(str::to_string) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
            file = Some((name, bytes.to_vec()));
            break;
        }
    }

    let (original_name, bytes) =
        file.ok_or_else(|| AppError::Validation("No image selected".into()))?;

    avatar_service(&state)
        .upload(auth.user_id, &original_name, &bytes)
        .await
        .map_err(map_avatar_error)?;

    Ok(Redirect::to("/"))
}

/// Stream a stored avatar image
pub async fn get_header(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let image = avatar_service(&state)
        .serve(&file_name)
        .await
        .map_err(map_avatar_error)?;

    Ok(([(header::CONTENT_TYPE, image.content_type)], image.bytes))
}

/// Point the avatar URL at an object already uploaded to the bucket
pub async fn update_header_url(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Form(body): Form<UpdateHeaderUrlRequest>,
) -> Result<Json<ApiEnvelope<()>>, AppError> {
    match avatar_service(&state)
        .set_remote(auth.user_id, &body.file_name)
        .await
    {
        Ok(_) => Ok(Json(ApiEnvelope::ok())),
        // Blank name is a user-visible outcome, not an HTTP failure
        Err(e @ AvatarError::BlankFileName) => Ok(Json(ApiEnvelope::fail(e.to_string()))),
        Err(e) => Err(map_avatar_error(e)),
    }
}

/// Change the current user's password
pub async fn change_password(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    Form(body): Form<ChangePasswordRequest>,
) -> Result<Json<ApiEnvelope<()>>, AppError> {
    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let session_repo = Arc::new(PgSessionRepository::new(state.db.clone()));
    let service = CredentialServiceImpl::new(user_repo, session_repo);

    match service
        .change_password(auth.user_id, &body.old_password, &body.new_password)
        .await
    {
        Ok(()) => Ok(Json(ApiEnvelope::ok())),
        Err(
            e @ (CredentialError::BlankOldPassword
            | CredentialError::IncorrectOldPassword
            | CredentialError::BlankNewPassword
            | CredentialError::PasswordUnchanged
            | CredentialError::UpdateFailed),
        ) => Ok(Json(ApiEnvelope::fail(e.to_string()))),
        Err(CredentialError::UserNotFound) => Err(AppError::NotFound("User not found".into())),
        Err(CredentialError::Internal(msg)) => Err(AppError::Internal(msg)),
    }
}

/// Aggregate profile view of a user
pub async fn get_profile(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    auth: Option<Extension<AuthUser>>,
) -> Result<Json<ApiEnvelope<ProfileResponse>>, AppError> {
    let user_id: i64 = user_id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid user ID".into()))?;
    let viewer_id = auth.map(|Extension(user)| user.user_id);

    let user_repo = Arc::new(PgUserRepository::new(state.db.clone()));
    let follow_repo = Arc::new(RedisFollowRepository::new(state.redis.clone()));
    let like_repo = Arc::new(RedisLikeRepository::new(state.redis.clone()));
    let service = ProfileServiceImpl::new(user_repo, follow_repo, like_repo);

    let profile = service
        .get_profile(user_id, viewer_id)
        .await
        .map_err(|e| match e {
            ProfileError::NotFound => AppError::NotFound("User not found".into()),
            e => AppError::Internal(e.to_string()),
        })?;

    Ok(Json(ApiEnvelope::ok_with(ProfileResponse::from(profile))))
}
