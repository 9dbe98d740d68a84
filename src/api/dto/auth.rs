/*
 * Responsibility
 * - Login request/response DTOs
 * - Shape validation (presence, email format) before credentials are checked
 */
use serde::{Deserialize, Serialize};

use crate::services::auth::Claims;

// Fields are optional so that a missing field is a 400 INVALID_INPUT rather
// than a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Validated credentials.
#[derive(Debug)]
pub struct LoginCredentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<LoginCredentials<'_>, (&'static str, &'static str)> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();

        if email.is_empty() || password.is_empty() {
            return Err(("INVALID_INPUT", "Email and password required"));
        }
        if !looks_like_email(email) {
            return Err(("INVALID_EMAIL", "Invalid email format"));
        }

        Ok(LoginCredentials { email, password })
    }
}

// `local@domain.tld`: exactly one '@', no whitespace, and a '.' strictly
// inside the domain part.
fn looks_like_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub sub: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    pub exp: i64,
}

impl From<&Claims> for SessionUser {
    fn from(claims: &Claims) -> Self {
        Self {
            sub: claims.subject().to_string(),
            role: claims.role().to_string(),
            iat: claims.issued_at().map(|t| t.timestamp()),
            exp: claims.expires_at().timestamp(),
        }
    }
}
