//! Credential hashing and verification.
//!
//! Passwords are hashed with bcrypt; the output string encodes algorithm,
//! cost, salt, and digest in the standard modular crypt format. A mismatch
//! is reported as `Ok(false)`, never as an error; only a malformed stored
//! hash produces an error.

use crate::errors::{DomainError, DomainResult};

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

/// Hashes a plaintext password with a per-call random salt
pub fn hash_password(plain: &str) -> DomainResult<String> {
    bcrypt::hash(plain, BCRYPT_COST).map_err(|e| DomainError::Internal {
        message: format!("password hashing failed: {}", e),
    })
}

/// Compares a plaintext password against a stored bcrypt hash
///
/// Returns `Ok(false)` for a mismatch. An error means the stored hash
/// string itself is malformed, which is an internal fault rather than a
/// failed login.
pub fn verify_password(plain: &str, hash: &str) -> DomainResult<bool> {
    bcrypt::verify(plain, hash).map_err(|e| DomainError::Internal {
        message: format!("stored password hash is malformed: {}", e),
    })
}
