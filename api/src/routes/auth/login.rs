//! Handler for POST /auth/login

use actix_web::{web, HttpResponse};
use validator::Validate;

use auth_shared::types::ErrorResponse;

use crate::app::AppState;
use crate::dto::{validation_message, AuthIdResponse, LoginRequest};
use crate::handlers::error_handler::handle_domain_error;

use super::cookies::build_auth_cookies;

/// Verifies credentials and starts a session.
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "id": "<user uuid>" }` with both token cookies set.
///
/// ## Errors
/// - 400 Bad Request: invalid body
/// - 401 Unauthorized: email or password does not match (one
///   indistinguishable outcome for both)
pub async fn login(state: web::Data<AppState>, request: web::Json<LoginRequest>) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse::new(
            "validation_error",
            validation_message(&errors),
        ));
    }

    match state.auth_service.login(request.into_inner().into()).await {
        Ok((user, pair)) => {
            let (access, refresh) = build_auth_cookies(&pair, &state.cookie_config);
            HttpResponse::Ok()
                .cookie(access)
                .cookie(refresh)
                .json(AuthIdResponse { id: user.id })
        }
        Err(error) => handle_domain_error(error),
    }
}
