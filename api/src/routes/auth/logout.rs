//! Handler for POST /auth/logout

use actix_web::HttpResponse;
use actix_web::web;
use serde_json::json;

use crate::app::AppState;
use crate::handlers::error_handler::handle_domain_error;
use crate::middleware::{AuthContext, RefreshContext};

use super::cookies::clear_auth_cookies;

/// Ends the presented session.
///
/// Deletes exactly the refresh grant backing the presented cookie; other
/// sessions of the same user keep theirs. The access token stays valid
/// until natural expiry, so both cookies are cleared on the client.
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "message": "Logged out" }` with both cookies cleared.
pub async fn logout(
    state: web::Data<AppState>,
    _auth: AuthContext,
    context: RefreshContext,
) -> HttpResponse {
    match state.auth_service.logout(&context.record).await {
        Ok(()) => {
            let (access, refresh) = clear_auth_cookies(&state.cookie_config);
            HttpResponse::Ok()
                .cookie(access)
                .cookie(refresh)
                .json(json!({ "message": "Logged out" }))
        }
        Err(error) => handle_domain_error(error),
    }
}
