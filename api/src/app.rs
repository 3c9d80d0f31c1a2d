//! Application state and route wiring.

use actix_web::web;
use std::sync::Arc;

use auth_core::services::auth::AuthService;
use auth_core::services::token::KeyProvider;
use auth_shared::config::CookieConfig;

use crate::middleware::{JwtAuth, JwtRefresh};
use crate::routes;

/// Shared state injected into every handler
pub struct AppState {
    /// Orchestrator of the authentication flows
    pub auth_service: Arc<AuthService>,
    /// Source of the published public key set
    pub key_provider: Arc<KeyProvider>,
    /// Cookie scoping configuration
    pub cookie_config: CookieConfig,
}

/// Registers all routes with their middleware
///
/// Registration and login are public. The profile endpoint requires a
/// verified access token; refresh requires a verified refresh grant;
/// logout requires both.
pub fn configure_routes(
    auth: JwtAuth,
    refresh: JwtRefresh,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/auth")
                .route("/register", web::post().to(routes::auth::register::register))
                .route("/login", web::post().to(routes::auth::login::login))
                .service(
                    web::resource("/self")
                        .wrap(auth.clone())
                        .route(web::get().to(routes::auth::self_::current_user)),
                )
                .service(
                    web::resource("/refresh")
                        .wrap(refresh.clone())
                        .route(web::post().to(routes::auth::refresh::refresh)),
                )
                .service(
                    web::resource("/logout")
                        .wrap(refresh)
                        .wrap(auth)
                        .route(web::post().to(routes::auth::logout::logout)),
                ),
        )
        .route("/.well-known/jwks.json", web::get().to(routes::jwks::jwks))
        .route("/health", web::get().to(routes::health::health_check));
    }
}
