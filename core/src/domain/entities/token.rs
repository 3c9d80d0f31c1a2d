//! Token entities: signed claim structures and the persisted refresh
//! token record.
//!
//! Claims are closed structs per token kind. Unknown or missing fields are
//! rejected at decode time rather than trusted.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::user::UserRole;
use crate::errors::TokenError;

/// Access token expiration time (1 hour)
pub const ACCESS_TOKEN_EXPIRY_MINUTES: i64 = 60;

/// Refresh token expiration time (365 days)
pub const REFRESH_TOKEN_EXPIRY_DAYS: i64 = 365;

/// JWT issuer
pub const JWT_ISSUER: &str = "auth-service";

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AccessClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the subject
    pub role: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl AccessClaims {
    /// Creates claims for a new access token
    pub fn new(user_id: Uuid, role: UserRole, issuer: &str, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Parses the subject as a user ID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }

    /// Parses the role claim
    pub fn user_role(&self) -> Result<UserRole, TokenError> {
        UserRole::parse(&self.role).ok_or(TokenError::Invalid)
    }
}

/// Claims carried by a refresh token
///
/// `rti` links the signed token back to its persisted
/// [`RefreshTokenRecord`]; deleting that record is the revocation
/// mechanism.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RefreshClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Role of the subject
    pub role: String,

    /// Refresh token record ID backing this token
    pub rti: String,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Issuer
    pub iss: String,
}

impl RefreshClaims {
    /// Creates claims for a new refresh token bound to a persisted record
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        record_id: Uuid,
        issuer: &str,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            role: role.as_str().to_string(),
            rti: record_id.to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
            iss: issuer.to_string(),
        }
    }

    /// Parses the subject as a user ID
    pub fn user_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::Invalid)
    }

    /// Parses the role claim
    pub fn user_role(&self) -> Result<UserRole, TokenError> {
        UserRole::parse(&self.role).ok_or(TokenError::Invalid)
    }

    /// Parses the backing record ID
    pub fn record_id(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.rti).map_err(|_| TokenError::Invalid)
    }
}

/// Persisted refresh token record
///
/// One record represents one outstanding, unrevoked refresh token grant.
/// The record exists iff the refresh token is currently valid for use;
/// there is no separate revoked flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshTokenRecord {
    /// Store-generated unique identifier
    pub id: Uuid,

    /// User this grant belongs to
    pub user_id: Uuid,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the grant expires
    pub expires_at: DateTime<Utc>,
}

impl RefreshTokenRecord {
    /// Creates a new record for a user with the given lifetime
    pub fn new(user_id: Uuid, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: now,
            expires_at: now + ttl,
        }
    }

    /// Checks whether the grant has expired
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Token pair issued together for one login/registration/refresh event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// RS256-signed access token
    pub access_token: String,

    /// HS256-signed refresh token
    pub refresh_token: String,

    /// Access token lifetime in seconds
    pub access_expires_in: i64,

    /// Refresh token lifetime in seconds
    pub refresh_expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_claims_round_trip() {
        let user_id = Uuid::new_v4();
        let claims = AccessClaims::new(
            user_id,
            UserRole::Customer,
            JWT_ISSUER,
            Duration::minutes(ACCESS_TOKEN_EXPIRY_MINUTES),
        );

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.user_role().unwrap(), UserRole::Customer);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.exp - claims.iat, ACCESS_TOKEN_EXPIRY_MINUTES * 60);
    }

    #[test]
    fn refresh_claims_link_back_to_record() {
        let user_id = Uuid::new_v4();
        let record = RefreshTokenRecord::new(user_id, Duration::days(REFRESH_TOKEN_EXPIRY_DAYS));
        let claims = RefreshClaims::new(
            user_id,
            UserRole::Manager,
            record.id,
            JWT_ISSUER,
            Duration::days(REFRESH_TOKEN_EXPIRY_DAYS),
        );

        assert_eq!(claims.record_id().unwrap(), record.id);
        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.user_role().unwrap(), UserRole::Manager);
    }

    #[test]
    fn access_claims_reject_unknown_fields() {
        let json = serde_json::json!({
            "sub": Uuid::new_v4().to_string(),
            "role": "customer",
            "iat": 0,
            "exp": i64::MAX,
            "iss": JWT_ISSUER,
            "injected": true,
        });

        let result: Result<AccessClaims, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn refresh_claims_require_record_id() {
        let json = serde_json::json!({
            "sub": Uuid::new_v4().to_string(),
            "role": "customer",
            "iat": 0,
            "exp": i64::MAX,
            "iss": JWT_ISSUER,
        });

        let result: Result<RefreshClaims, _> = serde_json::from_value(json);
        assert!(result.is_err());
    }

    #[test]
    fn fresh_record_is_not_expired() {
        let record =
            RefreshTokenRecord::new(Uuid::new_v4(), Duration::days(REFRESH_TOKEN_EXPIRY_DAYS));
        assert!(!record.is_expired());

        let mut expired = record.clone();
        expired.expires_at = Utc::now() - Duration::days(1);
        assert!(expired.is_expired());
    }

    #[test]
    fn invalid_role_claim_is_rejected() {
        let user_id = Uuid::new_v4();
        let mut claims = AccessClaims::new(
            user_id,
            UserRole::Customer,
            JWT_ISSUER,
            Duration::minutes(5),
        );
        claims.role = "root".to_string();

        assert!(claims.user_role().is_err());
    }
}
