//! Business services
//!
//! - `password` - credential hashing and verification
//! - `token` - token issuance, verification, and key management
//! - `auth` - register/login/refresh/logout orchestration

pub mod auth;
pub mod password;
pub mod token;

pub use auth::AuthService;
pub use token::{CachedKeyStore, KeyProvider, KeySource, TokenConfig, TokenService};
