//! Authenticate-only wrapper: bearer token → `Claims` in request extensions.
//!
//! - On success the wrapped handler runs and its response is returned untouched.
//! - On failure the handler is never called; the response is 401 with
//!   `UNAUTHORIZED` or `TOKEN_EXPIRED`.
//! - Handlers receive the identity through `AuthUser`.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use crate::error::AppError;
use crate::services::auth::Claims;
use crate::state::AppState;

/// Wrap `route` so it only runs for callers with a valid bearer token.
///
/// ```ignore
/// Router::new().route("/protected", with_auth(get(handler), &state))
/// ```
pub fn with_auth(route: MethodRouter<AppState>, state: &AppState) -> MethodRouter<AppState> {
    // route_layer: unmatched methods still get 405 instead of 401
    route.route_layer(middleware::from_fn_with_state(
        state.clone(),
        access_middleware,
    ))
}

/// Verify the request's bearer token, logging the failure kind (never the token).
pub(super) fn authenticate(state: &AppState, req: &Request<Body>) -> Result<Claims, AppError> {
    state.verifier.authenticate(req.headers()).map_err(|err| {
        tracing::warn!(
            error = %err,
            code = err.code(),
            method = %req.method(),
            path = %req.uri().path(),
            "access token verification failed"
        );
        AppError::from(err)
    })
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&state, &req)?;

    tracing::debug!(sub = %claims.subject(), role = %claims.role(), "authenticated");

    // middleware → extractor
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
