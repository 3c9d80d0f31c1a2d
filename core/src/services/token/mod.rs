//! Token service module
//!
//! This module implements the token lifecycle engine:
//! - Access token issuance (RS256) and refresh token issuance (HS256)
//! - Refresh token persistence, rotation, and revocation-by-deletion
//! - Signing key material loading and JWKS publication
//! - Verifier-side key lookup with caching and fetch rate limiting

mod config;
mod key_store;
mod keys;
mod service;

#[cfg(test)]
pub(crate) mod tests;

pub use config::TokenConfig;
pub use key_store::{CachedKeyStore, KeySource, KeyStoreConfig};
pub use keys::KeyProvider;
pub use service::TokenService;
