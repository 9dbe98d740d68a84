use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verified identity carried from the auth layer into handlers.
///
/// - Only `TokenVerifier` produces this type; there is no public constructor.
/// - `issuer` / `audience` are the values the token was checked against.
/// - Lives for one request and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claims {
    subject: String,
    role: String,
    issued_at: Option<DateTime<Utc>>,
    expires_at: DateTime<Utc>,
    issuer: String,
    audience: String,
}

impl Claims {
    pub(crate) fn new(
        subject: String,
        role: String,
        issued_at: Option<DateTime<Utc>>,
        expires_at: DateTime<Utc>,
        issuer: String,
        audience: String,
    ) -> Self {
        Self {
            subject,
            role,
            issued_at,
            expires_at,
            issuer,
            audience,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        self.issued_at
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn audience(&self) -> &str {
        &self.audience
    }
}

/// Wire shape of a token minted by `TokenIssuer`.
#[derive(Debug, Serialize)]
pub(crate) struct IssuedTokenClaims<'a> {
    pub iss: &'a str,
    pub aud: &'a str,
    pub sub: &'a str,
    pub role: &'a str,
    pub iat: i64,
    pub exp: i64,
}

/// Wire shape accepted by `TokenVerifier`.
///
/// `aud` may be a string or an array of strings; `jsonwebtoken` validates it
/// against the configured audience.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RawTokenClaims {
    pub iss: String,
    #[serde(default)]
    pub aud: serde_json::Value,
    pub sub: String,
    pub role: String,
    pub exp: i64,
    #[serde(default)]
    pub iat: Option<i64>,
}
