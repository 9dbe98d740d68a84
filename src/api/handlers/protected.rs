/*
 * Responsibility
 * - GET    /api/protected: any verified caller (with_auth)
 * - DELETE /api/protected: admin only (with_role_auth)
 * - POST   /api/protected: verifies inside the handler to customise the 401 body
 */
use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};

use crate::{
    api::{
        dto::{
            ApiResponse,
            protected::{ProcessedResponse, ProtectedResponse, UserSummary},
        },
        extractors::AuthUser,
    },
    error::AppError,
    services::auth::AuthError,
    state::AppState,
};

pub async fn get_protected(AuthUser(claims): AuthUser) -> Json<ApiResponse<ProtectedResponse>> {
    Json(ApiResponse::ok(ProtectedResponse {
        message: "You are authenticated!",
        user: UserSummary::from(&claims),
        server_time: Some(chrono::Utc::now().to_rfc3339()),
    }))
}

pub async fn delete_protected(AuthUser(claims): AuthUser) -> Json<ApiResponse<ProtectedResponse>> {
    tracing::info!(sub = %claims.subject(), "admin action performed");

    Json(ApiResponse::ok(ProtectedResponse {
        message: "Admin action performed successfully!",
        user: UserSummary::from(&claims),
        server_time: None,
    }))
}

// Body is taken as raw bytes so that authentication is decided before the
// payload is parsed.
pub async fn post_protected(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse<ProcessedResponse>>, AppError> {
    let claims = state.verifier.authenticate(&headers).map_err(|err| {
        tracing::warn!(error = %err, "manual verification failed");
        match err {
            AuthError::TokenExpired => AppError::unauthorized(
                "TOKEN_EXPIRED",
                "Your session has expired. Please login again.",
            ),
            _ => AppError::unauthorized("UNAUTHORIZED", "Unauthorized"),
        }
    })?;

    let received_data: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|_| AppError::bad_request("INVALID_JSON", "Invalid JSON in request body"))?;

    Ok(Json(ApiResponse::ok(ProcessedResponse {
        message: "Data processed successfully",
        processed_by: claims.subject().to_string(),
        received_data,
    })))
}
