//! Main token service implementation

use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::entities::token::{
    AccessClaims, RefreshClaims, RefreshTokenRecord, TokenPair,
};
use crate::domain::entities::user::UserRole;
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenConfig;
use super::keys::KeyProvider;

/// Service issuing, verifying, and revoking token pairs
///
/// Access tokens are signed asymmetrically (RS256, `kid` in the header) and
/// verified statelessly. Refresh tokens are signed symmetrically (HS256)
/// and embed the id of a persisted record; that record is the revocation
/// handle.
pub struct TokenService {
    repository: Arc<dyn TokenRepository>,
    key_provider: Arc<KeyProvider>,
    config: TokenConfig,
    refresh_encoding_key: EncodingKey,
    refresh_decoding_key: DecodingKey,
    refresh_validation: Validation,
}

impl TokenService {
    /// Creates a new token service
    pub fn new(
        repository: Arc<dyn TokenRepository>,
        key_provider: Arc<KeyProvider>,
        config: TokenConfig,
    ) -> Self {
        let refresh_encoding_key = EncodingKey::from_secret(config.refresh_secret.as_bytes());
        let refresh_decoding_key = DecodingKey::from_secret(config.refresh_secret.as_bytes());

        let mut refresh_validation = Validation::new(Algorithm::HS256);
        refresh_validation.set_issuer(&[&config.issuer]);
        refresh_validation.set_required_spec_claims(&["exp", "iss"]);

        Self {
            repository,
            key_provider,
            config,
            refresh_encoding_key,
            refresh_decoding_key,
            refresh_validation,
        }
    }

    /// Issues an access token for a user
    pub fn issue_access_token(&self, user_id: Uuid, role: UserRole) -> Result<String, DomainError> {
        let claims = AccessClaims::new(
            user_id,
            role,
            &self.config.issuer,
            Duration::minutes(self.config.access_token_expiry_minutes),
        );

        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(self.key_provider.kid().to_string());

        encode(&header, &claims, self.key_provider.encoding_key())
            .map_err(|_| TokenError::GenerationFailed.into())
    }

    /// Issues a refresh token bound to an already-persisted record
    fn issue_refresh_token(
        &self,
        user_id: Uuid,
        role: UserRole,
        record_id: Uuid,
    ) -> Result<String, DomainError> {
        let claims = RefreshClaims::new(
            user_id,
            role,
            record_id,
            &self.config.issuer,
            Duration::days(self.config.refresh_token_expiry_days),
        );

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.refresh_encoding_key,
        )
        .map_err(|_| TokenError::GenerationFailed.into())
    }

    /// Issues an access/refresh token pair for one login, registration, or
    /// rotation event
    ///
    /// The refresh token record is persisted FIRST; only then are the
    /// tokens signed, embedding the persisted id. A persistence failure
    /// aborts the flow before any token exists, so no refresh token is
    /// ever issued without a deletable record behind it.
    pub async fn issue_pair(&self, user_id: Uuid, role: UserRole) -> Result<TokenPair, DomainError> {
        let record = self
            .repository
            .create(user_id, Duration::days(self.config.refresh_token_expiry_days))
            .await?;

        let signed = self
            .issue_access_token(user_id, role)
            .and_then(|access_token| {
                let refresh_token = self.issue_refresh_token(user_id, role, record.id)?;
                Ok((access_token, refresh_token))
            });

        let (access_token, refresh_token) = match signed {
            Ok(pair) => pair,
            Err(e) => {
                // Do not leave an orphaned grant behind a failed issuance
                if let Err(delete_error) = self.repository.delete(record.id).await {
                    warn!(
                        record_id = %record.id,
                        "failed to remove orphaned record: {}", delete_error
                    );
                }
                return Err(e);
            }
        };

        debug!(user_id = %user_id, record_id = %record.id, "issued token pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.config.access_token_expiry_minutes * 60,
            refresh_expires_in: self.config.refresh_token_expiry_days * 86400,
        })
    }

    /// Decodes and validates a refresh token signature, expiry, and issuer
    fn decode_refresh_token(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        let token_data =
            decode::<RefreshClaims>(token, &self.refresh_decoding_key, &self.refresh_validation)
                .map_err(|e| {
                    if e.kind() == &jsonwebtoken::errors::ErrorKind::ExpiredSignature {
                        TokenError::Expired
                    } else {
                        TokenError::Invalid
                    }
                })?;

        Ok(token_data.claims)
    }

    /// Verifies a refresh token against signature, expiry, and the store
    ///
    /// A token whose backing record is missing is rejected exactly like a
    /// forged one; "never existed" and "already revoked" are
    /// indistinguishable to the caller. The record's owner must match the
    /// token subject.
    pub async fn verify_refresh_token(
        &self,
        token: &str,
    ) -> Result<(RefreshClaims, RefreshTokenRecord), DomainError> {
        let claims = self.decode_refresh_token(token)?;
        let record_id = claims.record_id()?;
        let user_id = claims.user_id()?;

        let record = self
            .repository
            .find_by_id(record_id)
            .await?
            .ok_or(TokenError::RecordNotFound)?;

        if record.user_id != user_id {
            return Err(TokenError::RecordNotFound.into());
        }

        if record.is_expired() {
            return Err(TokenError::Expired.into());
        }

        Ok((claims, record))
    }

    /// Rotates a verified refresh grant: issues a fresh pair bound to a
    /// new record, then revokes the old record
    ///
    /// Rotate-and-revoke: once the new pair exists the old grant is
    /// deleted, so the presented refresh token cannot be replayed after
    /// this call returns. Issuing before deleting keeps the old grant
    /// usable if the new issuance fails. A failed revocation is an error,
    /// never a silent success: the presented grant is still live and the
    /// caller must retry rather than hand out the new pair.
    pub async fn rotate(
        &self,
        old_record: &RefreshTokenRecord,
        role: UserRole,
    ) -> Result<TokenPair, DomainError> {
        let pair = self.issue_pair(old_record.user_id, role).await?;

        if let Err(e) = self.repository.delete(old_record.id).await {
            warn!(record_id = %old_record.id, "failed to revoke rotated grant: {}", e);
            return Err(e);
        }

        debug!(record_id = %old_record.id, "rotated refresh grant");
        Ok(pair)
    }

    /// Revokes a refresh grant by deleting its record
    ///
    /// Idempotent: revoking an already-deleted grant succeeds, so retried
    /// logout calls are safe.
    pub async fn revoke(&self, record_id: Uuid) -> Result<(), DomainError> {
        self.repository.delete(record_id).await?;
        debug!(record_id = %record_id, "revoked refresh grant");
        Ok(())
    }

    /// Removes expired records from the store
    pub async fn cleanup_expired(&self) -> Result<usize, DomainError> {
        self.repository.delete_expired().await
    }

    /// Issuer embedded in and required from every token
    pub fn issuer(&self) -> &str {
        &self.config.issuer
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.config.issuer)
            .field("key_provider", &self.key_provider)
            .finish()
    }
}
