use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{AuthError, Claims};
use crate::state::AppState;

/// Verified caller, inserted by `with_auth` / `with_role_auth`.
///
/// Rejects with 401 when no wrapper ran for this route.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AuthError::MissingToken.into())
    }
}

/// Optional authentication: the caller's identity when a valid bearer token is
/// present, `None` otherwise. Never rejects.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<Claims>);

impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<Claims>() {
            return Ok(MaybeAuthUser(Some(claims.clone())));
        }

        let claims = match state.verifier.authenticate(&parts.headers) {
            Ok(claims) => Some(claims),
            Err(AuthError::MissingToken) => None,
            Err(err) => {
                tracing::debug!(error = %err, "ignoring unusable bearer token");
                None
            }
        };

        Ok(MaybeAuthUser(claims))
    }
}
