//! Domain-specific error types and error handling.

use thiserror::Error;

/// Authentication-related errors
///
/// Credential failures deliberately collapse into a single
/// `InvalidCredentials` variant so a caller cannot tell a wrong email from
/// a wrong password.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Email or password does not match")]
    InvalidCredentials,

    #[error("Email is already registered")]
    EmailTaken,

    #[error("User not found")]
    UserNotFound,
}

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,

    #[error("Refresh token record not found")]
    RecordNotFound,

    #[error("Token generation failed")]
    GenerationFailed,

    #[error("Key material unavailable: {message}")]
    KeyMaterial { message: String },
}

/// Core domain errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridges to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// Whether the error should surface to callers as an authentication
    /// failure (401-class) rather than a server fault
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(AuthError::InvalidCredentials)
                | DomainError::Token(TokenError::Expired)
                | DomainError::Token(TokenError::Invalid)
                | DomainError::Token(TokenError::RecordNotFound)
        )
    }
}
