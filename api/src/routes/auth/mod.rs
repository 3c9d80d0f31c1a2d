//! Authentication route handlers
//!
//! - Registration and login (set both token cookies)
//! - Token refresh (rotates the refresh grant)
//! - Logout (revokes the grant, clears both cookies)
//! - Authenticated profile lookup

pub mod cookies;
pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;
pub mod self_;
