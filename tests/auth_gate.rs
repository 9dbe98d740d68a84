mod common;

use axum::{
    Router,
    http::{Method, StatusCode, header},
    routing::get,
};
use vibekit_api::{
    api::extractors::AuthUser,
    middleware::auth::{with_auth, with_role_auth},
    state::AppState,
};

use common::*;

async fn teapot(AuthUser(claims): AuthUser) -> (StatusCode, String) {
    (StatusCode::IM_A_TEAPOT, format!("brewed for {}", claims.subject()))
}

async fn handled(AuthUser(claims): AuthUser) -> String {
    format!("handled:{}:{}", claims.subject(), claims.role())
}

fn wrapped_router(state: &AppState) -> Router {
    Router::new()
        .route("/auth-only", with_auth(get(teapot), state))
        .route(
            "/staff",
            with_role_auth(get(handled), state, ["admin", "moderator"]),
        )
        .with_state(state.clone())
}

#[tokio::test]
async fn missing_header_is_401_unauthorized() {
    let app = test_app();
    let res = send(&app.router, request(Method::GET, "/api/protected", None, None)).await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn non_bearer_scheme_is_401_unauthorized() {
    let app = test_app();
    let mut req = request(Method::GET, "/api/protected", None, None);
    req.headers_mut().insert(
        header::AUTHORIZATION,
        "Basic dXNlcjpwYXNzd29yZA==".parse().unwrap(),
    );

    let res = send(&app.router, req).await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn valid_token_reaches_handler_with_claims() {
    let app = test_app();
    let token = token_for(&app.state, "alice@example.com", "user");

    let res = send(
        &app.router,
        request(Method::GET, "/api/protected", Some(&token), None),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK, "body: {}", res.text);
    assert_eq!(res.json["success"], true);
    assert_eq!(res.json["data"]["user"]["id"], "alice@example.com");
    assert_eq!(res.json["data"]["user"]["role"], "user");
    assert!(res.json["data"]["serverTime"].is_string());
}

#[tokio::test]
async fn one_second_past_expiry_is_401_token_expired() {
    let app = test_app();
    let token = expired_token_for(&app.state, "alice@example.com", "user");

    let res = send(
        &app.router,
        request(Method::GET, "/api/protected", Some(&token), None),
    )
    .await;

    assert_error(&res, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED");
}

#[tokio::test]
async fn expiry_at_the_current_second_is_401_token_expired() {
    let app = test_app();
    let token = token_expiring_now(&app.state, "alice@example.com", "user");

    let res = send(
        &app.router,
        request(Method::GET, "/api/protected", Some(&token), None),
    )
    .await;

    assert_error(&res, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED");
}

#[tokio::test]
async fn token_signed_with_other_secret_is_401_unauthorized() {
    let app = test_app();
    let token = default_foreign_token("not-the-configured-secret");

    let res = send(
        &app.router,
        request(Method::GET, "/api/protected", Some(&token), None),
    )
    .await;

    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
}

#[tokio::test]
async fn issuer_or_audience_mismatch_is_401_unauthorized() {
    let app = test_app();
    let wrong_iss = foreign_token(SECRET, "someone-else", "vibecode-api", "user");
    let wrong_aud = foreign_token(SECRET, "vibecode-kit", "another-api", "user");

    for token in [wrong_iss, wrong_aud] {
        let res = send(
            &app.router,
            request(Method::GET, "/api/protected", Some(&token), None),
        )
        .await;
        assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");
    }
}

#[tokio::test]
async fn user_role_on_admin_route_is_403_forbidden() {
    let app = test_app();
    let token = token_for(&app.state, "user@example.com", "user");

    let res = send(
        &app.router,
        request(Method::DELETE, "/api/protected", Some(&token), None),
    )
    .await;

    assert_error(&res, StatusCode::FORBIDDEN, "FORBIDDEN");
}

#[tokio::test]
async fn admin_role_on_admin_route_runs_handler() {
    let app = test_app();
    let token = token_for(&app.state, "admin@example.com", "admin");

    let res = send(
        &app.router,
        request(Method::DELETE, "/api/protected", Some(&token), None),
    )
    .await;

    assert_eq!(res.status, StatusCode::OK, "body: {}", res.text);
    assert_eq!(res.json["success"], true);
    assert_eq!(
        res.json["data"]["message"],
        "Admin action performed successfully!"
    );
    assert_eq!(res.json["data"]["user"]["role"], "admin");
}

#[tokio::test]
async fn role_route_still_reports_verification_failures_as_401() {
    let app = test_app();

    let res = send(
        &app.router,
        request(Method::DELETE, "/api/protected", None, None),
    )
    .await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "UNAUTHORIZED");

    let expired = expired_token_for(&app.state, "admin@example.com", "admin");
    let res = send(
        &app.router,
        request(Method::DELETE, "/api/protected", Some(&expired), None),
    )
    .await;
    assert_error(&res, StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED");
}

#[tokio::test]
async fn wrapped_handler_response_is_returned_unchanged() {
    let app = test_app();
    let router = wrapped_router(&app.state);
    let token = token_for(&app.state, "carol", "user");

    let res = send(&router, request(Method::GET, "/auth-only", Some(&token), None)).await;

    assert_eq!(res.status, StatusCode::IM_A_TEAPOT);
    assert_eq!(res.text, "brewed for carol");
}

#[tokio::test]
async fn admin_passes_admin_or_moderator_gate() {
    let app = test_app();
    let router = wrapped_router(&app.state);

    for role in ["admin", "moderator"] {
        let token = token_for(&app.state, "dana", role);
        let res = send(&router, request(Method::GET, "/staff", Some(&token), None)).await;

        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.text, format!("handled:dana:{role}"));
    }
}

#[tokio::test]
async fn role_match_is_case_sensitive() {
    let app = test_app();
    let router = wrapped_router(&app.state);
    let token = token_for(&app.state, "erin", "Admin");

    let res = send(&router, request(Method::GET, "/staff", Some(&token), None)).await;

    assert_error(&res, StatusCode::FORBIDDEN, "FORBIDDEN");
}

#[tokio::test]
async fn unwrapped_method_is_not_gated() {
    let app = test_app();

    let res = send(&app.router, request(Method::PUT, "/api/protected", None, None)).await;

    assert_eq!(res.status, StatusCode::METHOD_NOT_ALLOWED);
}
