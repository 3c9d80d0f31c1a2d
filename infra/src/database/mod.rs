//! Database module - MySQL implementations using SQLx
//!
//! Connection pool management and repository implementations for the
//! `users` and `refresh_tokens` tables.

pub mod connection;
pub mod mysql;

pub use connection::DatabasePool;
pub use mysql::{MySqlTokenRepository, MySqlUserRepository};
