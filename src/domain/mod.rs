//! # Domain Layer
//!
//! Core business types of the forum server, independent of any framework
//! or infrastructure concern.
//!
//! ## Structure
//!
//! - **entities**: User, DiscussPost, Comment and the repository traits
//!   that define data-access contracts
//! - **events**: the notification Event record and the producer trait
//!
//! Repository and producer traits are defined here so the application layer
//! depends on contracts, not on PostgreSQL or Redis.

pub mod entities;
pub mod events;

// Re-export commonly used types
pub use entities::*;
pub use events::*;
