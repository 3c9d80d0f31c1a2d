//! Configuration module with business-specific sub-modules
//!
//! Configuration is organized into logical areas:
//! - `auth` - Token signing, key material, and cookie configuration
//! - `database` - Database connection and pool configuration
//! - `server` - HTTP server binding configuration

pub mod auth;
pub mod database;
pub mod server;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use auth::{CookieConfig, JwtConfig};
pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing and key material configuration
    pub jwt: JwtConfig,

    /// Cookie attributes for issued tokens
    pub cookie: CookieConfig,
}

impl AppConfig {
    /// Load the full configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            database: DatabaseConfig::from_env(),
            jwt: JwtConfig::from_env(),
            cookie: CookieConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
            cookie: CookieConfig::default(),
        }
    }
}
