/*
 * Responsibility
 * - Application-wide AppError
 * - IntoResponse (HTTP status + `{ success: false, error, code }` body)
 * - The single AuthError -> HTTP mapping used by the auth middleware/extractors
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::auth::AuthError;

pub const FORBIDDEN_MESSAGE: &str = "You do not have permission to access this resource";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
    pub code: &'static str,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{code}: {message}")]
    Unauthorized { code: &'static str, message: String },
    #[error("forbidden: {message}")]
    Forbidden { message: String },
    #[error("request timed out")]
    RequestTimeout,
    #[error("request body too large")]
    PayloadTooLarge,
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn unauthorized(code: &'static str, message: impl Into<String>) -> Self {
        Self::Unauthorized {
            code,
            message: message.into(),
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Forbidden { .. } => StatusCode::FORBIDDEN,
            AppError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            AppError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { code, message } => (code, message),
            AppError::Unauthorized { code, message } => (code, message),
            AppError::Forbidden { message } => ("FORBIDDEN", message),
            AppError::RequestTimeout => ("REQUEST_TIMEOUT", "Request timed out".into()),
            AppError::PayloadTooLarge => ("PAYLOAD_TOO_LARGE", "Request body too large".into()),
            AppError::Internal => ("INTERNAL_ERROR", "Internal server error".into()),
        };

        let body = ErrorResponse {
            success: false,
            error: message,
            code,
        };

        (status, Json(body)).into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::InsufficientRole => AppError::forbidden(FORBIDDEN_MESSAGE),
            // Never surface configuration details to the caller.
            AuthError::Configuration(_) => {
                AppError::unauthorized(e.code(), "Authentication failed")
            }
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::TokenExpired => {
                AppError::unauthorized(e.code(), e.to_string())
            }
        }
    }
}
