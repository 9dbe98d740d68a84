use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use tracing::error;

use crate::error::AppError;
use crate::services::auth::claims::IssuedTokenClaims;
use crate::services::auth::error::AuthError;

/// HS256 access-token signer sharing its secret/issuer/audience with `TokenVerifier`.
#[derive(Clone)]
pub struct TokenIssuer {
    issuer: String,
    audience: String,
    ttl_seconds: i64,
    encoding_key: EncodingKey,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenIssuer")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish()
    }
}

impl TokenIssuer {
    pub fn new(
        secret: &str,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        ttl_seconds: u64,
    ) -> Result<Self, AuthError> {
        if secret.trim().is_empty() {
            return Err(AuthError::Configuration("JWT_SECRET is not configured"));
        }

        let ttl_seconds = i64::try_from(ttl_seconds)
            .map_err(|_| AuthError::Configuration("ACCESS_TOKEN_TTL_SECONDS is out of range"))?;

        Ok(Self {
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_seconds,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
        })
    }

    pub fn ttl_seconds(&self) -> u64 {
        self.ttl_seconds.unsigned_abs()
    }

    /// Issue an access token valid from now for `ttl_seconds`.
    pub fn issue(&self, subject: &str, role: &str) -> Result<String, AppError> {
        self.issue_at(subject, role, Utc::now())
    }

    /// Issue an access token as if signed at `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        role: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<String, AppError> {
        let iat = issued_at.timestamp();
        let claims = IssuedTokenClaims {
            iss: &self.issuer,
            aud: &self.audience,
            sub: subject,
            role,
            iat,
            exp: iat.saturating_add(self.ttl_seconds),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            error!(error = %e, "failed to sign JWT");
            AppError::Internal
        })
    }
}
