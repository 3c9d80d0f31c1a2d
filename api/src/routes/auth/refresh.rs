//! Handler for POST /auth/refresh

use actix_web::{web, HttpResponse};

use crate::app::AppState;
use crate::dto::AuthIdResponse;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::RefreshContext;

use super::cookies::build_auth_cookies;

/// Exchanges a verified refresh grant for a fresh token pair.
///
/// The refresh middleware has already verified the cookie; this handler
/// rotates the grant and re-sets both cookies.
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "id": "<user uuid>" }` with fresh token cookies.
///
/// ## Errors
/// - 401 Unauthorized: missing, invalid, expired, or revoked refresh token
///   (rejected by the middleware)
pub async fn refresh(state: web::Data<AppState>, context: RefreshContext) -> HttpResponse {
    match state
        .auth_service
        .refresh(&context.claims, &context.record)
        .await
    {
        Ok((user_id, pair)) => {
            let (access, refresh) = build_auth_cookies(&pair, &state.cookie_config);
            HttpResponse::Ok()
                .cookie(access)
                .cookie(refresh)
                .json(AuthIdResponse { id: user_id })
        }
        Err(error) => handle_domain_error(error),
    }
}
