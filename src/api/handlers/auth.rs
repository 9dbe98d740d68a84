/*
 * Responsibility
 * - POST /api/auth/login: check credentials, mint an access token
 * - GET  /api/auth/login: echo the verified identity (mounted behind with_auth)
 */
use axum::{Json, extract::State};

use crate::{
    api::{
        dto::{
            ApiResponse,
            auth::{LoginRequest, LoginResponse, SessionResponse, SessionUser},
        },
        extractors::AuthUser,
    },
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let creds = req
        .validate()
        .map_err(|(code, message)| AppError::bad_request(code, message))?;

    let Some(principal) = state
        .credentials
        .verify(creds.email, creds.password)
        .await
    else {
        tracing::warn!(email = %creds.email, "login rejected");
        return Err(AppError::unauthorized(
            "INVALID_CREDENTIALS",
            "Invalid email or password",
        ));
    };

    // Subject is the stored email, not the caller's spelling of it
    let token = state.issuer.issue(&principal.email, &principal.role)?;
    tracing::info!(sub = %principal.email, role = %principal.role, "access token issued");

    Ok(Json(ApiResponse::ok(LoginResponse { token })))
}

pub async fn session(AuthUser(claims): AuthUser) -> Json<ApiResponse<SessionResponse>> {
    Json(ApiResponse::ok(SessionResponse {
        user: SessionUser::from(&claims),
    }))
}
