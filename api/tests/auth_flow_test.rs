//! End-to-end tests of the HTTP surface over in-memory repositories.

mod common;

use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::{test, App, ResponseError};
use serde_json::{json, Value};

use auth_api::app::configure_routes;

use common::{harness, TestHarness};

macro_rules! init_app {
    ($h:expr) => {
        test::init_service(
            App::new()
                .app_data($h.state.clone())
                .configure(configure_routes($h.jwt_auth.clone(), $h.jwt_refresh.clone())),
        )
        .await
    };
}

// Middleware rejections surface as service errors, not responses
macro_rules! assert_unauthorized {
    ($app:expr, $req:expr) => {{
        let err = test::try_call_service($app, $req)
            .await
            .expect_err("request is rejected before reaching a handler");
        assert_eq!(
            err.as_response_error().status_code(),
            StatusCode::UNAUTHORIZED
        );
    }};
}

fn register_body() -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": "ada@example.com",
        "password": "correct horse battery"
    })
}

/// Pulls the two token cookies out of a response
fn token_cookies(resp: &actix_web::dev::ServiceResponse) -> (Cookie<'static>, Cookie<'static>) {
    let mut access = None;
    let mut refresh = None;
    for cookie in resp.response().cookies() {
        match cookie.name() {
            "accessToken" => access = Some(cookie.into_owned()),
            "refreshToken" => refresh = Some(cookie.into_owned()),
            _ => {}
        }
    }
    (
        access.expect("accessToken cookie set"),
        refresh.expect("refreshToken cookie set"),
    )
}

#[actix_web::test]
async fn register_sets_both_cookies_and_returns_id() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let (access, refresh) = token_cookies(&resp);
    assert!(!access.value().is_empty());
    assert!(!refresh.value().is_empty());
    assert_eq!(access.http_only(), Some(true));

    let body: Value = test::read_body_json(resp).await;
    assert!(body["id"].is_string());
    assert_eq!(h.token_repository.len().await, 1);
}

#[actix_web::test]
async fn register_rejects_invalid_body_and_duplicates() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "not-an-email",
                "password": "correct horse battery"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn profile_requires_a_valid_access_token() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    let (access, _) = token_cookies(&resp);

    // Cookie-based access
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/self")
            .cookie(access.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["role"], "customer");
    assert!(body.get("password_hash").is_none());

    // Bearer-based access with the same token
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/self")
            .insert_header(("Authorization", format!("Bearer {}", access.value())))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // No credentials
    assert_unauthorized!(&app, test::TestRequest::get().uri("/auth/self").to_request());

    // Garbage token
    assert_unauthorized!(
        &app,
        test::TestRequest::get()
            .uri("/auth/self")
            .cookie(Cookie::new("accessToken", "not.a.token"))
            .to_request()
    );
}

#[actix_web::test]
async fn login_failures_are_indistinguishable() {
    let h = harness();
    let app = init_app!(h);

    test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;

    let wrong_password = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "ada@example.com", "password": "wrong"}))
            .to_request(),
    )
    .await;
    let unknown_email = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/login")
            .set_json(json!({"email": "nobody@example.com", "password": "correct horse battery"}))
            .to_request(),
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_body: Value = test::read_body_json(wrong_password).await;
    let unknown_body: Value = test::read_body_json(unknown_email).await;
    assert_eq!(wrong_body["error"], unknown_body["error"]);
    assert_eq!(wrong_body["message"], unknown_body["message"]);
}

#[actix_web::test]
async fn refresh_rotates_the_grant_and_kills_the_old_cookie() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    let (_, old_refresh) = token_cookies(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/refresh")
            .cookie(old_refresh.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let (_, new_refresh) = token_cookies(&resp);
    assert_ne!(new_refresh.value(), old_refresh.value());
    assert_eq!(h.token_repository.len().await, 1);

    // The presented cookie is dead after rotation
    assert_unauthorized!(
        &app,
        test::TestRequest::post()
            .uri("/auth/refresh")
            .cookie(old_refresh)
            .to_request()
    );

    // The new cookie still works
    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/refresh")
            .cookie(new_refresh)
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_revokes_the_grant_and_clears_cookies() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    let (access, refresh) = token_cookies(&resp);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/logout")
            .cookie(access.clone())
            .cookie(refresh.clone())
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let (cleared_access, cleared_refresh) = token_cookies(&resp);
    assert_eq!(cleared_access.value(), "");
    assert_eq!(cleared_refresh.value(), "");
    assert_eq!(h.token_repository.len().await, 0);

    // The revoked refresh cookie no longer works
    assert_unauthorized!(
        &app,
        test::TestRequest::post()
            .uri("/auth/refresh")
            .cookie(refresh)
            .to_request()
    );
}

#[actix_web::test]
async fn logout_without_access_token_is_rejected() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/auth/register")
            .set_json(register_body())
            .to_request(),
    )
    .await;
    let (_, refresh) = token_cookies(&resp);

    assert_unauthorized!(
        &app,
        test::TestRequest::post()
            .uri("/auth/logout")
            .cookie(refresh)
            .to_request()
    );
    // The grant survives a rejected logout
    assert_eq!(h.token_repository.len().await, 1);
}

#[actix_web::test]
async fn jwks_endpoint_publishes_the_key_set() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/.well-known/jwks.json")
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["keys"][0]["kid"], "test-key-1");
    assert_eq!(body["keys"][0]["kty"], "RSA");
}

#[actix_web::test]
async fn health_endpoint_reports_healthy() {
    let h = harness();
    let app = init_app!(h);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
}
