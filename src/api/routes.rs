/*
 * Responsibility
 * - URL structure under /api
 * - Which routes are wrapped with with_auth / with_role_auth is decided here
 */
use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::api::handlers::{
    auth::{login, session},
    health::health,
    protected::{delete_protected, get_protected, post_protected},
    whoami::whoami,
};
use crate::middleware::auth::{with_auth, with_role_auth};
use crate::state::AppState;

pub const ADMIN_ROLES: [&str; 1] = ["admin"];

pub fn routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route(
            "/auth/login",
            with_auth(get(session), state).merge(post(login)),
        )
        .route(
            "/protected",
            with_auth(get(get_protected), state)
                .merge(with_role_auth(delete(delete_protected), state, ADMIN_ROLES))
                .merge(post(post_protected)),
        )
        .route("/whoami", get(whoami))
}
