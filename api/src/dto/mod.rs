//! Request and response data transfer objects

pub mod auth_dto;

pub use auth_dto::{AuthIdResponse, LoginRequest, RegisterRequest, UserResponse};

use validator::ValidationErrors;

/// Flattens validator output into a single client-facing message
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    fields.sort_unstable();

    if fields.is_empty() {
        "Invalid request body".to_string()
    } else {
        format!("Invalid value for: {}", fields.join(", "))
    }
}
