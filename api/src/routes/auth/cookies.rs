//! Token cookie construction.
//!
//! Both tokens travel in httpOnly cookies scoped to the configured domain.
//! A flow either sets or clears both cookies; callers receive the pair as
//! a tuple so a partial write cannot happen by construction.

use actix_web::cookie::{time::Duration, Cookie, SameSite};

use auth_core::domain::entities::token::TokenPair;
use auth_shared::config::CookieConfig;

use crate::middleware::auth::ACCESS_TOKEN_COOKIE;
use crate::middleware::refresh::REFRESH_TOKEN_COOKIE;

/// Builds the access and refresh cookies for a freshly issued pair
pub fn build_auth_cookies(
    pair: &TokenPair,
    config: &CookieConfig,
) -> (Cookie<'static>, Cookie<'static>) {
    (
        token_cookie(
            ACCESS_TOKEN_COOKIE,
            pair.access_token.clone(),
            pair.access_expires_in,
            config,
        ),
        token_cookie(
            REFRESH_TOKEN_COOKIE,
            pair.refresh_token.clone(),
            pair.refresh_expires_in,
            config,
        ),
    )
}

/// Builds expired cookies that remove both tokens from the client
pub fn clear_auth_cookies(config: &CookieConfig) -> (Cookie<'static>, Cookie<'static>) {
    (
        token_cookie(ACCESS_TOKEN_COOKIE, String::new(), 0, config),
        token_cookie(REFRESH_TOKEN_COOKIE, String::new(), 0, config),
    )
}

fn token_cookie(
    name: &'static str,
    value: String,
    max_age_seconds: i64,
    config: &CookieConfig,
) -> Cookie<'static> {
    Cookie::build(name, value)
        .domain(config.domain.clone())
        .path("/")
        .http_only(true)
        .secure(config.secure)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> TokenPair {
        TokenPair {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            access_expires_in: 3600,
            refresh_expires_in: 31_536_000,
        }
    }

    #[test]
    fn cookies_are_http_only_and_strict() {
        let config = CookieConfig::default();
        let (access, refresh) = build_auth_cookies(&pair(), &config);

        for cookie in [&access, &refresh] {
            assert_eq!(cookie.http_only(), Some(true));
            assert_eq!(cookie.same_site(), Some(SameSite::Strict));
            assert_eq!(cookie.path(), Some("/"));
            assert_eq!(cookie.domain(), Some(config.domain.as_str()));
        }

        assert_eq!(access.max_age(), Some(Duration::seconds(3600)));
        assert_eq!(refresh.max_age(), Some(Duration::seconds(31_536_000)));
    }

    #[test]
    fn clearing_cookies_expires_them_immediately() {
        let config = CookieConfig::default();
        let (access, refresh) = clear_auth_cookies(&config);

        assert_eq!(access.value(), "");
        assert_eq!(refresh.value(), "");
        assert_eq!(access.max_age(), Some(Duration::ZERO));
        assert_eq!(refresh.max_age(), Some(Duration::ZERO));
    }
}
