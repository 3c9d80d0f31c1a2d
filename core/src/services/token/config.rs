//! Configuration for the token service

use auth_shared::config::JwtConfig;

use crate::domain::entities::token::{
    ACCESS_TOKEN_EXPIRY_MINUTES, JWT_ISSUER, REFRESH_TOKEN_EXPIRY_DAYS,
};

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// Issuer claim embedded in every token
    pub issuer: String,
    /// Symmetric secret for refresh token signing
    pub refresh_secret: String,
    /// Access token expiry in minutes
    pub access_token_expiry_minutes: i64,
    /// Refresh token expiry in days
    pub refresh_token_expiry_days: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            issuer: JWT_ISSUER.to_string(),
            refresh_secret: "development-refresh-secret-change-in-production".to_string(),
            access_token_expiry_minutes: ACCESS_TOKEN_EXPIRY_MINUTES,
            refresh_token_expiry_days: REFRESH_TOKEN_EXPIRY_DAYS,
        }
    }
}

impl From<&JwtConfig> for TokenConfig {
    fn from(config: &JwtConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_token_expiry_minutes: config.access_token_expiry_minutes,
            refresh_token_expiry_days: config.refresh_token_expiry_days,
        }
    }
}
