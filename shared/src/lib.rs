//! Shared utilities and common types for the auth service
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - Response envelope and error payload structures
//! - Utility functions (email validation, etc.)

pub mod config;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CookieConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use types::response::{ApiResponse, ErrorResponse};
pub use utils::validation;
