//! Authenticate-and-authorize wrapper.
//!
//! Verification failures → 401 (same as `with_auth`).
//! Verified caller whose role is outside the allow-list → 403 `FORBIDDEN`.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
    routing::MethodRouter,
};

use super::access::authenticate;
use crate::error::AppError;
use crate::services::auth::RoleGate;
use crate::state::AppState;

#[derive(Clone)]
struct RoleGuard {
    state: AppState,
    gate: Arc<RoleGate>,
}

/// Wrap `route` so it only runs for verified callers holding one of `roles`.
///
/// ```ignore
/// Router::new().route("/admin", with_role_auth(delete(handler), &state, ["admin"]))
/// ```
pub fn with_role_auth<I, S>(
    route: MethodRouter<AppState>,
    state: &AppState,
    roles: I,
) -> MethodRouter<AppState>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let guard = RoleGuard {
        state: state.clone(),
        gate: Arc::new(RoleGate::new(roles)),
    };

    route.route_layer(middleware::from_fn_with_state(guard, role_middleware))
}

async fn role_middleware(
    State(guard): State<RoleGuard>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let claims = authenticate(&guard.state, &req)?;

    if let Err(err) = guard.gate.check(&claims) {
        tracing::warn!(
            sub = %claims.subject(),
            role = %claims.role(),
            path = %req.uri().path(),
            "role not permitted"
        );
        return Err(err.into());
    }

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
