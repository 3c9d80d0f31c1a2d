//! API middleware for authentication and cross-cutting concerns

pub mod auth;
pub mod cors;
pub mod refresh;

pub use auth::{AuthContext, JwtAuth};
pub use refresh::{JwtRefresh, RefreshContext};
