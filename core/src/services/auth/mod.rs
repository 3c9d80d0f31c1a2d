//! Authentication flows: register, login, refresh, logout
//!
//! Orchestrates the credential verifier, user repository, and token
//! service. All collaborators are injected explicitly at construction;
//! there is no process-wide state.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, LoginInput, RegisterInput};
