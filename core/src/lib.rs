//! # Auth Service Core
//!
//! Core business logic and domain layer for the authentication service.
//! This crate contains the token lifecycle engine: domain entities,
//! repository interfaces, the token and auth services, and the error types
//! that tie them together.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::token::{AccessClaims, RefreshClaims, RefreshTokenRecord, TokenPair};
pub use domain::entities::user::{User, UserRole};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{TokenRepository, UserRepository};
pub use services::auth::AuthService;
pub use services::token::{CachedKeyStore, KeyProvider, KeySource, TokenConfig, TokenService};
