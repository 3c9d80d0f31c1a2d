//! Maps domain errors onto HTTP responses.
//!
//! Credential and token failures surface with deliberately non-specific
//! messages. Internal faults return a generic body; the details go to the
//! log only.

use actix_web::HttpResponse;

use auth_core::errors::{AuthError, DomainError};
use auth_shared::types::ErrorResponse;

/// Converts a `DomainError` into the appropriate HTTP response
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_unauthorized() {
        return HttpResponse::Unauthorized()
            .json(ErrorResponse::new("unauthorized", "Authentication failed"));
    }

    match error {
        DomainError::Validation { message } => {
            HttpResponse::BadRequest().json(ErrorResponse::new("validation_error", message))
        }
        DomainError::Auth(AuthError::EmailTaken) => HttpResponse::BadRequest().json(
            ErrorResponse::new("email_taken", "Email is already registered"),
        ),
        DomainError::Auth(AuthError::UserNotFound) => {
            HttpResponse::NotFound().json(ErrorResponse::new("not_found", "User not found"))
        }
        other => {
            log::error!("API error: {:?}", other);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                "internal_error",
                "An internal error occurred",
            ))
        }
    }
}
