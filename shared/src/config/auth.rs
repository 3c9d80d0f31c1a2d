//! Token signing and cookie configuration

use serde::{Deserialize, Serialize};

/// JWT signing configuration
///
/// Access tokens are signed asymmetrically (RS256) with the private key
/// loaded from `private_key_path`; the matching public keys are published
/// as the JWKS document at `jwks_path`. Refresh tokens are signed with the
/// symmetric `refresh_secret`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Issuer claim embedded in every token
    pub issuer: String,

    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,

    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,

    /// Symmetric secret for refresh token signing
    pub refresh_secret: String,

    /// Path to the PEM-encoded RS256 private key
    pub private_key_path: String,

    /// Path to the published JWKS document
    pub jwks_path: String,

    /// Key identifier of the current signing key
    pub kid: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            issuer: String::from("auth-service"),
            access_token_expiry_minutes: 60,
            refresh_token_expiry_days: 365,
            refresh_secret: String::from("development-refresh-secret-change-in-production"),
            private_key_path: String::from("certs/private.pem"),
            jwks_path: String::from("certs/jwks.json"),
            kid: String::from("auth-service-key-1"),
        }
    }
}

impl JwtConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
            access_token_expiry_minutes: std::env::var("ACCESS_TOKEN_EXPIRY_MINUTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.access_token_expiry_minutes),
            refresh_token_expiry_days: std::env::var("REFRESH_TOKEN_EXPIRY_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.refresh_token_expiry_days),
            refresh_secret: std::env::var("REFRESH_TOKEN_SECRET").unwrap_or(defaults.refresh_secret),
            private_key_path: std::env::var("JWT_PRIVATE_KEY_PATH").unwrap_or(defaults.private_key_path),
            jwks_path: std::env::var("JWT_JWKS_PATH").unwrap_or(defaults.jwks_path),
            kid: std::env::var("JWT_KEY_ID").unwrap_or(defaults.kid),
        }
    }

    /// Access token expiry in seconds
    pub fn access_token_expiry_seconds(&self) -> i64 {
        self.access_token_expiry_minutes * 60
    }

    /// Refresh token expiry in seconds
    pub fn refresh_token_expiry_seconds(&self) -> i64 {
        self.refresh_token_expiry_days * 86400
    }
}

/// Cookie attributes applied to the `accessToken` and `refreshToken` cookies
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CookieConfig {
    /// Domain scope for issued cookies
    pub domain: String,

    /// Whether cookies require HTTPS
    pub secure: bool,
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            domain: String::from("localhost"),
            secure: false,
        }
    }
}

impl CookieConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            domain: std::env::var("COOKIE_DOMAIN").unwrap_or(defaults.domain),
            secure: std::env::var("COOKIE_SECURE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.secure),
        }
    }
}
