//! Application Services
//!
//! Business logic between the HTTP handlers and the repositories.

mod avatar_service;
mod comment_service;
mod credential_service;
mod profile_service;

pub use avatar_service::{
    AvatarError, AvatarImage, AvatarService, AvatarServiceImpl, AvatarStore,
};
pub use comment_service::{
    CommentDto, CommentError, CommentService, CommentServiceImpl, CreateCommentDto,
};
pub use credential_service::{CredentialError, CredentialService, CredentialServiceImpl};
pub use profile_service::{ProfileDto, ProfileError, ProfileService, ProfileServiceImpl, UserDto};

#[cfg(test)]
pub use avatar_service::MockAvatarStore;
