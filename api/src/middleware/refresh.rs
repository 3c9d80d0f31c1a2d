//! Refresh token verification middleware.
//!
//! Reads the `refreshToken` cookie, verifies signature, expiry, and the
//! backing store record, and injects the verified claims and record into
//! request extensions for the refresh and logout handlers.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};

use auth_core::domain::entities::token::{RefreshClaims, RefreshTokenRecord};
use auth_core::services::token::TokenService;

/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refreshToken";

/// Verified refresh grant injected into requests
#[derive(Debug, Clone)]
pub struct RefreshContext {
    /// Claims decoded from the presented token
    pub claims: RefreshClaims,
    /// The store record backing the grant
    pub record: RefreshTokenRecord,
}

/// Refresh token verification middleware factory
#[derive(Clone)]
pub struct JwtRefresh {
    token_service: Arc<TokenService>,
}

impl JwtRefresh {
    /// Creates the middleware over the token service
    pub fn new(token_service: Arc<TokenService>) -> Self {
        Self { token_service }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtRefresh
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtRefreshMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtRefreshMiddleware {
            service: Rc::new(service),
            token_service: Arc::clone(&self.token_service),
        }))
    }
}

/// Refresh token verification middleware service
pub struct JwtRefreshMiddleware<S> {
    service: Rc<S>,
    token_service: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtRefreshMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let token_service = Arc::clone(&self.token_service);

        Box::pin(async move {
            let token = match req.cookie(REFRESH_TOKEN_COOKIE) {
                Some(cookie) => cookie.value().to_string(),
                None => return Err(ErrorUnauthorized("Refresh token required")),
            };

            let (claims, record) = match token_service.verify_refresh_token(&token).await {
                Ok(verified) => verified,
                Err(e) => {
                    log::debug!("refresh token rejected: {}", e);
                    return Err(ErrorUnauthorized("Invalid or expired refresh token"));
                }
            };

            req.extensions_mut().insert(RefreshContext { claims, record });

            service.call(req).await
        })
    }
}

/// Extractor for a verified refresh grant
impl FromRequest for RefreshContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<RefreshContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Refresh token required"));

        ready(result)
    }
}
