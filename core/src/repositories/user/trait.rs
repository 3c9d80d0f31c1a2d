//! User repository trait defining the interface for user persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// The token engine only ever creates users at registration and reads them
/// afterwards; profile and role mutation live outside this core.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user
    ///
    /// # Returns
    /// * `Ok(User)` - The saved user
    /// * `Err(DomainError)` - Save failed (e.g., duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Find a user by id
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that id
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Find a user by normalized email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;
}
