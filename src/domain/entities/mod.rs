//! Core domain entities and their repository traits.

mod comment;
mod post;
mod session;
mod social;
mod user;

pub use comment::{
    Comment, CommentRepository, CommentStatus, CommentTarget, EntityKind, NewComment,
};
pub use post::{DiscussPost, PostRepository};
pub use session::SessionRepository;
pub use social::{FollowRepository, LikeRepository};
pub use user::{User, UserRepository};

#[cfg(test)]
pub use comment::MockCommentRepository;
#[cfg(test)]
pub use post::MockPostRepository;
#[cfg(test)]
pub use session::MockSessionRepository;
#[cfg(test)]
pub use social::{MockFollowRepository, MockLikeRepository};
#[cfg(test)]
pub use user::MockUserRepository;
