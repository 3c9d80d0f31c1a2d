//! Repository interfaces for the persistence collaborator

pub mod token;
pub mod user;

pub use token::TokenRepository;
pub use user::UserRepository;

#[cfg(test)]
pub use token::MockTokenRepository;
#[cfg(test)]
pub use user::MockUserRepository;
