#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use chrono::{Duration, Utc};
use serde_json::Value;
use tower::ServiceExt;

use vibekit_api::{
    app,
    config::{Config, DEFAULT_AUTH_AUDIENCE, DEFAULT_AUTH_ISSUER},
    services::auth::TokenIssuer,
    state::AppState,
};

pub const SECRET: &str = "integration-test-secret";
pub const USERS: &str = "admin@example.com:admin-pass:admin,user@example.com:password123:user";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_config() -> Config {
    test_config_with(&[])
}

/// Test configuration with extra variables layered on top.
pub fn test_config_with(extra: &[(&str, &str)]) -> Config {
    Config::from_lookup(|key| {
        if let Some((_, value)) = extra.iter().find(|(k, _)| *k == key) {
            return Some(value.to_string());
        }
        match key {
            "JWT_SECRET" => Some(SECRET.to_string()),
            "AUTH_USERS" => Some(USERS.to_string()),
            _ => None,
        }
    })
    .expect("test config")
}

pub fn test_app() -> TestApp {
    test_app_with(&[])
}

pub fn test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let config = test_config_with(extra);
    let state = app::build_state(&config).expect("test state");
    let router = app::build_router(state.clone(), &config);
    TestApp { router, state }
}

pub fn token_for(state: &AppState, sub: &str, role: &str) -> String {
    state.issuer.issue(sub, role).expect("issue token")
}

/// Token whose `exp` lies one second in the past.
pub fn expired_token_for(state: &AppState, sub: &str, role: &str) -> String {
    let ttl = state.issuer.ttl_seconds() as i64;
    state
        .issuer
        .issue_at(sub, role, Utc::now() - Duration::seconds(ttl + 1))
        .expect("issue token")
}

/// Token whose `exp` is the current second.
pub fn token_expiring_now(state: &AppState, sub: &str, role: &str) -> String {
    let ttl = state.issuer.ttl_seconds() as i64;
    state
        .issuer
        .issue_at(sub, role, Utc::now() - Duration::seconds(ttl))
        .expect("issue token")
}

pub fn foreign_token(secret: &str, issuer: &str, audience: &str, role: &str) -> String {
    TokenIssuer::new(secret, issuer, audience, 3600)
        .expect("foreign issuer")
        .issue("intruder@example.com", role)
        .expect("issue token")
}

pub fn default_foreign_token(secret: &str) -> String {
    foreign_token(secret, DEFAULT_AUTH_ISSUER, DEFAULT_AUTH_AUDIENCE, "admin")
}

pub fn request(method: Method, uri: &str, bearer: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub json: Value,
}

pub async fn send(router: &Router, req: Request<Body>) -> TestResponse {
    let res = router.clone().oneshot(req).await.expect("infallible");
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.expect("body");
    let text = String::from_utf8_lossy(&bytes).into_owned();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        text,
        json,
    }
}

pub fn assert_error(res: &TestResponse, status: StatusCode, code: &str) {
    assert_eq!(res.status, status, "body: {}", res.text);
    assert_eq!(res.json["success"], false);
    assert_eq!(res.json["code"], code);
    assert!(res.json["error"].is_string());
}
