//! Error taxonomy for bearer-token verification and role checks.
//!
//! The set is closed: callers dispatch on the variant, never on the message.
//! HTTP mapping lives in `crate::error` (`From<AuthError> for AppError`).
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No `Authorization` header, a non-Bearer scheme, or an empty token.
    #[error("Missing authorization header")]
    MissingToken,

    /// Bad signature, malformed token, issuer/audience mismatch or missing claims.
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Insufficient permissions")]
    InsufficientRole,

    /// Signing material is absent. Never recovered with a default secret.
    #[error("auth configuration error: {0}")]
    Configuration(&'static str),
}

impl AuthError {
    /// Stable machine-readable code carried in the JSON error body.
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InsufficientRole => "FORBIDDEN",
            AuthError::MissingToken | AuthError::InvalidToken | AuthError::Configuration(_) => {
                "UNAUTHORIZED"
            }
        }
    }
}
