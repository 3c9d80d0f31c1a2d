//! Token repository trait defining the interface for refresh token record
//! persistence.

use async_trait::async_trait;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::RefreshTokenRecord;
use crate::errors::DomainError;

/// Repository trait for refresh token record persistence
///
/// A record exists iff the corresponding refresh token is currently valid
/// for use. Deleting the record is the sole revocation mechanism; there is
/// no revoked flag to flip.
///
/// Implementations must guarantee at least read-committed isolation per
/// record. Concurrent refresh attempts against the same record may both
/// observe existence; this replay window is accepted.
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Create and persist a new record for a user
    ///
    /// The store computes `expires_at = now + ttl` and generates the id.
    /// The returned record carries the id that the refresh token about to
    /// be issued will embed.
    ///
    /// # Returns
    /// * `Ok(RefreshTokenRecord)` - The persisted record
    /// * `Err(DomainError)` - Persistence failed; no token may be issued
    async fn create(&self, user_id: Uuid, ttl: Duration) -> Result<RefreshTokenRecord, DomainError>;

    /// Find a record by its id
    ///
    /// # Returns
    /// * `Ok(Some(RefreshTokenRecord))` - Record found, grant still valid
    /// * `Ok(None)` - Never existed or already revoked
    /// * `Err(DomainError)` - Database error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<RefreshTokenRecord>, DomainError>;

    /// Delete a record, revoking its refresh token
    ///
    /// Idempotent: deleting an unknown id is `Ok(false)`, not an error, so
    /// retried logout calls succeed.
    ///
    /// # Returns
    /// * `Ok(true)` - Record deleted
    /// * `Ok(false)` - No record with that id
    /// * `Err(DomainError)` - Deletion failed
    async fn delete(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Delete expired records from the store
    ///
    /// Maintenance sweep; expired grants are already unusable because the
    /// signed token's own expiry has passed.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records deleted
    /// * `Err(DomainError)` - Deletion failed
    async fn delete_expired(&self) -> Result<usize, DomainError>;
}
