//! # Infrastructure Layer
//!
//! Concrete implementations of the persistence interfaces defined in
//! `auth_core`, backed by MySQL through SQLx. The domain layer never sees
//! SQLx types; everything crossing the boundary is a domain entity or a
//! `DomainError`.

pub mod database;

pub use database::{DatabasePool, MySqlTokenRepository, MySqlUserRepository};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
