//! Handler for POST /auth/register

use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_shared::types::ErrorResponse;

use crate::app::AppState;
use crate::dto::{validation_message, AuthIdResponse, RegisterRequest};
use crate::handlers::error_handler::handle_domain_error;

use super::cookies::build_auth_cookies;

/// Registers a new account and signs it in.
///
/// # Response
///
/// ## Success (201 Created)
/// `{ "id": "<user uuid>" }` with both token cookies set.
///
/// ## Errors
/// - 400 Bad Request: invalid body or email already registered
/// - 500 Internal Server Error: hashing or persistence failure
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            validation_message(&errors),
        ));
    }

    match state
        .auth_service
        .register(request.into_inner().into())
        .await
    {
        Ok((user, pair)) => {
            let (access, refresh) = build_auth_cookies(&pair, &state.cookie_config);
            HttpResponse::Created()
                .cookie(access)
                .cookie(refresh)
                .json(AuthIdResponse { id: user.id })
        }
        Err(error) => handle_domain_error(error),
    }
}
