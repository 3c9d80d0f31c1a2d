//! Handler for GET /.well-known/jwks.json

use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// Publishes the trusted public key set.
///
/// External verifiers resolve access token signing keys from here by
/// `kid`. The set may carry multiple keys during a rotation window.
pub async fn jwks(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.key_provider.jwk_set())
}
