//! Repository Implementations
//!
//! Concrete data access behind the domain traits: PostgreSQL for entities
//! and sessions, Redis for the social aggregates.

mod comment_repository;
mod post_repository;
mod session_repository;
mod social_repository;
mod user_repository;

pub use comment_repository::PgCommentRepository;
pub use post_repository::PgPostRepository;
pub use session_repository::PgSessionRepository;
pub use social_repository::{RedisFollowRepository, RedisLikeRepository};
pub use user_repository::PgUserRepository;
