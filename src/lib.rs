//! # Forum Server Library
//!
//! This crate provides a discussion-forum backend with:
//! - User profile aggregation (likes, follows)
//! - Avatar upload, both local and via a cloud object-storage bucket
//! - Password change with session invalidation
//! - Comment posting with fan-out notification events over Redis pub/sub
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **Domain Layer**: Core entities, repository traits and the Event model
//! - **Application Layer**: Business logic services and DTOs
//! - **Infrastructure Layer**: Database, Redis, storage and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! forum_server/
//! +-- config/        Configuration management
//! +-- domain/        Domain entities, events, and traits
//! +-- application/   Application services and DTOs
//! +-- infrastructure/ Database, Redis, storage implementations
//! +-- presentation/  HTTP routes, handlers and middleware
//! +-- shared/        Common utilities (errors, validation)
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
