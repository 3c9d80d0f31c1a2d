//! Access token verification middleware.
//!
//! Extracts the access token from the Authorization header or the
//! `accessToken` cookie, verifies it against the cached public key set,
//! and injects the caller's identity into request extensions.
//!
//! Verification is fully stateless: the middleware never touches the
//! refresh token store.

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use auth_core::domain::entities::token::AccessClaims;
use auth_core::domain::entities::user::UserRole;
use auth_core::errors::DomainError;
use auth_core::services::token::CachedKeyStore;

/// Cookie carrying the access token when no Authorization header is sent
pub const ACCESS_TOKEN_COOKIE: &str = "accessToken";

/// User authentication context injected into requests
#[derive(Debug, Clone)]
pub struct AuthContext {
    /// User ID extracted from the token subject
    pub user_id: Uuid,
    /// Role carried in the token
    pub role: UserRole,
}

impl AuthContext {
    /// Creates an authentication context from verified claims
    pub fn from_claims(claims: &AccessClaims) -> Result<Self, DomainError> {
        Ok(Self {
            user_id: claims.user_id()?,
            role: claims.user_role()?,
        })
    }
}

/// Access token verification middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    key_store: Arc<CachedKeyStore>,
    issuer: String,
}

impl JwtAuth {
    /// Creates the middleware over a cached key store
    pub fn new(key_store: Arc<CachedKeyStore>, issuer: impl Into<String>) -> Self {
        Self {
            key_store,
            issuer: issuer.into(),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            key_store: Arc::clone(&self.key_store),
            issuer: self.issuer.clone(),
        }))
    }
}

/// Access token verification middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    key_store: Arc<CachedKeyStore>,
    issuer: String,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
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
        let key_store = Arc::clone(&self.key_store);
        let issuer = self.issuer.clone();

        Box::pin(async move {
            let token = match extract_access_token(&req) {
                Some(token) => token,
                None => return Err(ErrorUnauthorized("Authentication required")),
            };

            let claims = match key_store.verify_access_token(&token, &issuer).await {
                Ok(claims) => claims,
                Err(e) => {
                    log::debug!("access token rejected: {}", e);
                    return Err(ErrorUnauthorized("Invalid or expired token"));
                }
            };

            let context = AuthContext::from_claims(&claims)
                .map_err(|_| ErrorUnauthorized("Invalid or expired token"))?;

            req.extensions_mut().insert(context);

            service.call(req).await
        })
    }
}

/// Extracts the access token from the request
///
/// The Authorization header takes precedence. Some HTTP clients serialize
/// an unset variable as the literal string "undefined"; such a bearer
/// value is treated as absent and the `accessToken` cookie is used
/// instead.
fn extract_access_token(req: &ServiceRequest) -> Option<String> {
    if let Some(token) = extract_bearer_token(req) {
        if token != "undefined" {
            return Some(token);
        }
    }

    req.cookie(ACCESS_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
}

/// Extracts a Bearer token from the Authorization header
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| ErrorUnauthorized("Authentication required"));

        ready(result)
    }
}
