use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::services::auth::claims::{Claims, RawTokenClaims};
use crate::services::auth::error::AuthError;

/// Extract the token from `Authorization: Bearer <token>`.
///
/// The scheme is matched case-insensitively; surrounding whitespace is ignored.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value
        .trim()
        .split_once(char::is_whitespace)
        .ok_or(AuthError::MissingToken)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    Ok(token)
}

/// HS256 access-token verifier.
///
/// `jsonwebtoken::Validation` checks:
/// - signature (HS256 only)
/// - `exp` with the configured leeway (tightened in `verify` so that
///   `exp == now` is already expired)
/// - `iss` and `aud` (exact match against configuration)
/// - presence of `exp`, `iss`, `aud`, `sub`
///
/// `verify` additionally rejects empty `sub` / `role`.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
    audience: String,
    leeway_seconds: i64,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        secret: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration("JWT_SECRET is not configured"));
        }

        let leeway = i64::try_from(leeway_seconds)
            .map_err(|_| AuthError::Configuration("ACCESS_TOKEN_LEEWAY_SECONDS is out of range"))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            audience: audience.to_string(),
            leeway_seconds: leeway,
        })
    }

    /// Read the bearer token from `headers` and verify it.
    pub fn authenticate(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        self.verify(token)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let data =
            jsonwebtoken::decode::<RawTokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|e| match e.kind() {
                    ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken,
                })?;

        let raw = data.claims;

        // `jsonwebtoken` only rejects `exp < now - leeway`
        if raw.exp.saturating_add(self.leeway_seconds) <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        if raw.sub.trim().is_empty() || raw.role.trim().is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let expires_at = timestamp(raw.exp).ok_or(AuthError::InvalidToken)?;
        let issued_at = match raw.iat {
            Some(iat) => Some(timestamp(iat).ok_or(AuthError::InvalidToken)?),
            None => None,
        };

        let audience = matched_audience(&raw.aud, &self.audience).ok_or(AuthError::InvalidToken)?;

        Ok(Claims::new(
            raw.sub, raw.role, issued_at, expires_at, raw.iss, audience,
        ))
    }
}

fn timestamp(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}

fn matched_audience(aud: &serde_json::Value, expected: &str) -> Option<String> {
    match aud {
        serde_json::Value::String(s) if s == expected => Some(s.clone()),
        serde_json::Value::Array(arr) => arr
            .iter()
            .filter_map(|v| v.as_str())
            .find(|s| *s == expected)
            .map(str::to_string),
        _ => None,
    }
}
