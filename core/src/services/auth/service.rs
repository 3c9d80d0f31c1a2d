//! Authentication service implementation

use std::sync::Arc;

use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::entities::token::{RefreshClaims, RefreshTokenRecord, TokenPair};
use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainError};
use crate::repositories::UserRepository;
use crate::services::password;
use crate::services::token::TokenService;

use auth_shared::utils::validation::normalize_email;

/// Validated registration input
///
/// Shape enforcement (field presence, email format, password policy)
/// happens in the routing collaborator; this core trusts the shape.
#[derive(Debug, Clone)]
pub struct RegisterInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

/// Validated login input
#[derive(Debug, Clone)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Orchestrator of the four authentication flows
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    tokens: Arc<TokenService>,
}

impl AuthService {
    /// Creates the service with its injected collaborators
    pub fn new(users: Arc<dyn UserRepository>, tokens: Arc<TokenService>) -> Self {
        Self { users, tokens }
    }

    /// Registers a new user and issues their first token pair
    ///
    /// Exactly one user and one refresh token record are created per
    /// successful call. If record persistence fails, the error propagates
    /// and no tokens exist.
    pub async fn register(&self, input: RegisterInput) -> Result<(User, TokenPair), DomainError> {
        let email = normalize_email(&input.email);
        debug!(email = %email, "new registration request");

        if self.users.find_by_email(&email).await?.is_some() {
            return Err(AuthError::EmailTaken.into());
        }

        let password_hash = password::hash_password(&input.password)?;
        let user = self
            .users
            .create(User::new(input.first_name, input.last_name, email, password_hash))
            .await?;

        info!(user_id = %user.id, "user registered");

        let pair = self.tokens.issue_pair(user.id, user.role).await?;
        Ok((user, pair))
    }

    /// Verifies credentials and issues a token pair
    ///
    /// A wrong email and a wrong password produce the same
    /// `InvalidCredentials` outcome so callers cannot enumerate accounts.
    pub async fn login(&self, input: LoginInput) -> Result<(User, TokenPair), DomainError> {
        let email = normalize_email(&input.email);

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !password::verify_password(&input.password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, "user logged in");

        let pair = self.tokens.issue_pair(user.id, user.role).await?;
        Ok((user, pair))
    }

    /// Exchanges a verified refresh grant for a fresh token pair
    ///
    /// The caller must already have verified the token via the refresh
    /// middleware. The old record is revoked once the new pair exists
    /// (rotate-and-revoke).
    pub async fn refresh(
        &self,
        claims: &RefreshClaims,
        record: &RefreshTokenRecord,
    ) -> Result<(Uuid, TokenPair), DomainError> {
        let role = claims.user_role()?;
        let pair = self.tokens.rotate(record, role).await?;
        Ok((record.user_id, pair))
    }

    /// Revokes the refresh grant backing the presented token
    ///
    /// Deletes exactly that record; other outstanding sessions of the same
    /// user keep their grants. Access tokens remain valid until natural
    /// expiry.
    pub async fn logout(&self, record: &RefreshTokenRecord) -> Result<(), DomainError> {
        self.tokens.revoke(record.id).await?;
        info!(user_id = %record.user_id, "user logged out");
        Ok(())
    }

    /// Read-only profile lookup for the authenticated user
    pub async fn current_user(&self, user_id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AuthError::UserNotFound.into())
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish()
    }
}
